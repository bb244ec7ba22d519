//! Utility modules for repaint

pub mod mime;
