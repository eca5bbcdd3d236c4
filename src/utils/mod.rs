//! Utility functions for the triage pipeline.

pub mod image;

pub use image::load_image;
