//! Application state: the area registry and the "current" cursors.
//!
//! Ownership is strictly tree-shaped (areas own layers own shapes); the
//! current-area/layer/shape cursors are plain ids, never references, and
//! every deletion path fixes up cursors that pointed at the removed entity.

use crate::config::Config;
use crate::draw::{Area, Color, Layer, Shape, ShapeKind};
use crate::id::IdGenerator;
use anyhow::Result;
use log::info;

/// Top-level state shared by all commands.
pub struct App {
    pub areas: Vec<Area>,
    /// Id of the active area, if any
    pub current_area: Option<u64>,
    /// Id of the active layer within the active area
    pub current_layer: Option<u64>,
    /// Id of the most recently created/selected shape
    pub current_shape: Option<u64>,

    /// Color applied to newly created shapes
    pub draw_color: Color,
    /// Fill flag applied to newly created shapes
    pub draw_fill: bool,
    /// Thickness applied to newly created shapes
    pub draw_thickness: f64,

    default_width: u32,
    default_height: u32,
    empty_char: char,
    full_char: char,

    ids: IdGenerator,
}

impl App {
    /// Builds the initial state: one default area with one default layer,
    /// both selected.
    pub fn new(config: &Config, ids: IdGenerator) -> Self {
        let mut app = Self {
            areas: Vec::new(),
            current_area: None,
            current_layer: None,
            current_shape: None,
            draw_color: config.drawing.default_color,
            draw_fill: config.drawing.fill,
            draw_thickness: config.drawing.default_thickness,
            default_width: config.canvas.default_width,
            default_height: config.canvas.default_height,
            empty_char: config.canvas.empty_char,
            full_char: config.canvas.full_char,
            ids,
        };

        let area_id = app.create_area(app.default_width, app.default_height, "Area1");
        info!("Created default area {area_id}");
        app
    }

    /// Persists the id counter. Call before dropping the app.
    pub fn shutdown(&self) -> Result<()> {
        self.ids.save()
    }

    // ========================================================================
    // Areas
    // ========================================================================

    /// Creates an area with a fresh default layer and selects both.
    pub fn create_area(&mut self, width: u32, height: u32, name: impl Into<String>) -> u64 {
        let area_id = self.ids.next_id();
        let mut area = Area::new(width, height, area_id, name);
        area.empty_char = self.empty_char;
        area.full_char = self.full_char;
        area.clear_grid();

        let layer_id = self.ids.next_id();
        area.add_layer(Layer::new(layer_id, "Layer 1"));

        self.areas.push(area);
        self.current_area = Some(area_id);
        self.current_layer = Some(layer_id);
        self.current_shape = None;
        area_id
    }

    /// Dimensions for newly created areas, from config.
    pub fn default_dimensions(&self) -> (u32, u32) {
        (self.default_width, self.default_height)
    }

    pub fn current_area(&self) -> Option<&Area> {
        let id = self.current_area?;
        self.areas.iter().find(|a| a.id == id)
    }

    pub fn current_area_mut(&mut self) -> Option<&mut Area> {
        let id = self.current_area?;
        self.areas.iter_mut().find(|a| a.id == id)
    }

    /// Removes an area (cascading to its layers and shapes). Returns
    /// `false` if the id is unknown; cursors pointing into the removed area
    /// fall back to the first remaining area and its first layer.
    pub fn remove_area(&mut self, id: u64) -> bool {
        let before = self.areas.len();
        self.areas.retain(|a| a.id != id);
        if self.areas.len() == before {
            return false;
        }

        if self.current_area == Some(id) {
            self.current_area = self.areas.first().map(|a| a.id);
            self.current_layer = self
                .areas
                .first()
                .and_then(|a| a.layers.first())
                .map(|l| l.id);
            self.current_shape = None;
        }
        true
    }

    /// Selects an area by id; resets the layer cursor to its first layer
    /// and clears the shape cursor. Returns `false` for unknown ids.
    pub fn select_area(&mut self, id: u64) -> bool {
        let Some(area) = self.areas.iter().find(|a| a.id == id) else {
            return false;
        };
        self.current_layer = area.layers.first().map(|l| l.id);
        self.current_area = Some(id);
        self.current_shape = None;
        true
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Creates a layer in the current area and selects it. Returns `None`
    /// when no area is active.
    pub fn create_layer(&mut self, name: impl Into<String>) -> Option<u64> {
        self.current_area()?;
        let layer_id = self.ids.next_id();
        let area = self.current_area_mut()?;
        area.add_layer(Layer::new(layer_id, name));
        self.current_layer = Some(layer_id);
        self.current_shape = None;
        Some(layer_id)
    }

    pub fn current_layer(&self) -> Option<&Layer> {
        let id = self.current_layer?;
        self.current_area()?.find_layer(id)
    }

    pub fn current_layer_mut(&mut self) -> Option<&mut Layer> {
        let id = self.current_layer?;
        self.current_area_mut()?.find_layer_mut(id)
    }

    /// Removes a layer from the current area. The layer cursor falls back
    /// to the area's first remaining layer.
    pub fn remove_layer(&mut self, id: u64) -> bool {
        let was_current = self.current_layer == Some(id);
        let Some(area) = self.current_area_mut() else {
            return false;
        };
        if !area.remove_layer(id) {
            return false;
        }
        if was_current {
            self.current_layer = self
                .current_area()
                .and_then(|a| a.layers.first())
                .map(|l| l.id);
            self.current_shape = None;
        }
        true
    }

    /// Selects a layer within the current area.
    pub fn select_layer(&mut self, id: u64) -> bool {
        let exists = self
            .current_area()
            .is_some_and(|a| a.find_layer(id).is_some());
        if exists {
            self.current_layer = Some(id);
            self.current_shape = None;
        }
        exists
    }

    // ========================================================================
    // Shapes
    // ========================================================================

    /// Creates a shape with the current drawing defaults in the current
    /// layer and selects it. Returns `None` when no layer is active.
    pub fn add_shape(&mut self, kind: ShapeKind) -> Option<u64> {
        self.current_layer()?;
        let id = self.ids.next_id();
        let shape = Shape::with_attrs(id, kind, self.draw_fill, self.draw_thickness, self.draw_color);
        let layer = self.current_layer_mut()?;
        layer.add_shape(shape);
        self.current_shape = Some(id);
        Some(id)
    }

    /// Removes a shape from the current layer and clears the shape cursor.
    pub fn remove_shape(&mut self, id: u64) -> bool {
        let Some(layer) = self.current_layer_mut() else {
            return false;
        };
        if !layer.remove_shape(id) {
            return false;
        }
        if self.current_shape == Some(id) {
            self.current_shape = None;
        }
        true
    }

    /// Selects a shape within the current layer.
    pub fn select_shape(&mut self, id: u64) -> bool {
        let exists = self
            .current_layer()
            .is_some_and(|l| l.find_shape(id).is_some());
        if exists {
            self.current_shape = Some(id);
        }
        exists
    }
}
