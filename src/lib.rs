//! Library exports for the termsketch drawing engine.
//!
//! Exposes the drawing core (shapes, rasterizer, layers, areas, renderer)
//! alongside the application state and command layer so external tools can
//! reuse them without going through the interactive binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod draw;
pub mod id;

pub use app::App;
pub use config::Config;
