//! Named shape groups with visibility and z-ordering.

use super::shape::Shape;

/// An ordered, named collection of shapes within an area.
///
/// Insertion order is z-order: shapes added later draw on top. The layer
/// owns its shapes; removing a shape drops it.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Identifier unique within the owning area
    pub id: u64,
    pub name: String,
    /// Hidden layers are skipped entirely during rendering
    pub visible: bool,
    pub shapes: Vec<Shape>,
}

impl Layer {
    /// Creates an empty, visible layer.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            shapes: Vec::new(),
        }
    }

    /// Appends a shape on top of the existing ones.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Removes a shape by id. Returns `false` if no shape matched; callers
    /// that don't care may ignore the result (silent no-op semantics).
    pub fn remove_shape(&mut self, id: u64) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        self.shapes.len() != before
    }

    pub fn find_shape(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Flips visibility without touching the contained shapes.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
