//! Capability traits

mod transformer;

pub use transformer::ImageTransformer;
