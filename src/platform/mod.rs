//! Platform layer
//!
//! The browser build mounts engines on 2D canvases (`web`). Native builds
//! have no platform surface; they drive engines headless with a
//! `RecordingSurface`.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, PaddleBallView, WheelView};
