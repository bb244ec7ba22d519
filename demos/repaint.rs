//! Repaint a house photo from the command line.
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! RUST_LOG=repaint=debug cargo run --example repaint -- house.jpg "Classic Navy" out.png
//! ```

use std::sync::Arc;

use repaint::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("usage: repaint <image> [color] [output]")?;
    let color_name = args.next().unwrap_or_else(|| ColorChoice::default().name);
    let output = args.next().unwrap_or_else(|| "repainted.png".to_string());

    let color = ColorChoice::find(&color_name).ok_or_else(|| {
        let names: Vec<String> = ColorChoice::palette().into_iter().map(|c| c.name).collect();
        format!("unknown color {color_name:?}; choose one of {}", names.join(", "))
    })?;

    let client = GeminiClient::from_env()?;
    let session = TransformationSession::new(Arc::new(client));
    if !session.is_configured() {
        return Err("GEMINI_API_KEY is not set".into());
    }

    let probe = session.test_connection().await;
    tracing::info!(success = probe.success, message = %probe.message, "connection probe");

    let image = EncodedImage::from_file(&input).await?;
    let options = TransformationOptions::studio_defaults();

    match session.invoke(image, color, Some(options)).await {
        TransformationResult::Success { output_image } => {
            tokio::fs::write(&output, output_image.decode_bytes()?).await?;
            println!("Wrote {output}");
            Ok(())
        }
        TransformationResult::Failure { error, kind } => {
            Err(format!("repaint failed ({kind:?}): {error}").into())
        }
    }
}
