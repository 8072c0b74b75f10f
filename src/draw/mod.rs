//! Drawing primitives and the geometry-to-raster engine.
//!
//! This module defines the core drawing types:
//! - [`Color`]: the closed color palette shapes can use
//! - [`Shape`]/[`ShapeKind`]: geometric primitives with draw attributes
//! - [`raster`]: pure shape-to-pixel conversion (Bresenham lines, midpoint
//!   circles, scanline fills, Bezier flattening)
//! - [`Layer`]: named, visibility-toggleable shape groups
//! - [`Area`]: the fixed-size character grid plus its layer stack
//! - [`render`]: compositing and terminal output

pub mod area;
pub mod color;
pub mod layer;
pub mod raster;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use area::Area;
pub use color::Color;
pub use layer::Layer;
pub use raster::{Pixel, rasterize};
pub use render::{DrawOptions, clear_screen, draw_area, render_area};
pub use shape::{Shape, ShapeKind};
