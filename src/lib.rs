//! Swatchpick - perceptual color picking against a reference palette
//!
//! HTTP service and CLI around the `swatch-match` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
