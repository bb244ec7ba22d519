use serde::{Deserialize, Serialize};

/// A paint color offered to the user.
///
/// Identity is by `name`: two choices with the same name compare equal even if
/// their hex codes differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorChoice {
    /// Display name, unique within a palette
    pub name: String,
    /// Hex color string, e.g. `#1e3a8a`
    pub hex: String,
    /// Presentation hint: draw a visible border around the swatch (light colors)
    #[serde(default, rename = "border", skip_serializing_if = "std::ops::Not::not")]
    pub has_border: bool,
}

const PALETTE: [(&str, &str, bool); 6] = [
    ("Swiss White", "#FFFFFF", true),
    ("Midnight Black", "#171717", false),
    ("Slate Blue", "#475569", false),
    ("Forest Green", "#14532d", false),
    ("Burnt Sienna", "#7c2d12", false),
    ("Classic Navy", "#1e3a8a", false),
];

impl ColorChoice {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            has_border: false,
        }
    }

    pub fn with_border(mut self, has_border: bool) -> Self {
        self.has_border = has_border;
        self
    }

    /// The studio palette, in display order.
    pub fn palette() -> Vec<ColorChoice> {
        PALETTE
            .iter()
            .map(|(name, hex, border)| ColorChoice::new(*name, *hex).with_border(*border))
            .collect()
    }

    /// Look up a palette color by name.
    pub fn find(name: &str) -> Option<ColorChoice> {
        Self::palette().into_iter().find(|c| c.name == name)
    }
}

impl Default for ColorChoice {
    /// Slate Blue, the palette's initial selection.
    fn default() -> Self {
        let (name, hex, border) = PALETTE[2];
        ColorChoice::new(name, hex).with_border(border)
    }
}

impl PartialEq for ColorChoice {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ColorChoice {}

impl std::hash::Hash for ColorChoice {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
