//! Fixed-size character canvases holding stacked layers.

use super::color::Color;
use super::layer::Layer;

/// Default character for untouched cells.
pub const DEFAULT_EMPTY_CHAR: char = '.';
/// Default character for rasterized cells.
pub const DEFAULT_FULL_CHAR: char = '#';

/// A drawing canvas: a width x height character grid plus its layers.
///
/// Grid dimensions are fixed at creation. The area owns both the grid
/// buffer and the layers (which in turn own their shapes); layer insertion
/// order is compositing order, later layers drawing on top.
#[derive(Clone, Debug)]
pub struct Area {
    pub id: u64,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major cell characters, length width * height
    cells: Vec<char>,
    /// Per-cell color of the last write, row-major like `cells`
    cell_colors: Vec<Option<Color>>,
    pub layers: Vec<Layer>,
    /// Character printed for untouched cells
    pub empty_char: char,
    /// Character printed for rasterized cells
    pub full_char: char,
}

impl Area {
    /// Creates an area with the grid fully initialised to the empty
    /// character and no layers.
    pub fn new(width: u32, height: u32, id: u64, name: impl Into<String>) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            id,
            name: name.into(),
            width,
            height,
            cells: vec![DEFAULT_EMPTY_CHAR; len],
            cell_colors: vec![None; len],
            layers: Vec::new(),
            empty_char: DEFAULT_EMPTY_CHAR,
            full_char: DEFAULT_FULL_CHAR,
        }
    }

    /// Resets every cell to the empty character without touching layers or
    /// shapes.
    pub fn clear_grid(&mut self) {
        self.cells.fill(self.empty_char);
        self.cell_colors.fill(None);
    }

    /// Appends a layer on top of the existing stack.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Removes a layer (and all its shapes) by id. Returns `false` if no
    /// layer matched.
    pub fn remove_layer(&mut self, id: u64) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        self.layers.len() != before
    }

    pub fn find_layer(&self, id: u64) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn find_layer_mut(&mut self, id: u64) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// True if the coordinate lands on the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Writes one cell. Out-of-bounds coordinates are silently dropped so
    /// drawing operations stay total.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, color: Option<Color>) {
        if self.in_bounds(x, y) {
            let idx = (y as usize) * (self.width as usize) + x as usize;
            self.cells[idx] = ch;
            self.cell_colors[idx] = color;
        }
    }

    /// Reads one cell; out of bounds returns `None`.
    pub fn cell(&self, x: i32, y: i32) -> Option<char> {
        if self.in_bounds(x, y) {
            Some(self.cells[(y as usize) * (self.width as usize) + x as usize])
        } else {
            None
        }
    }

    /// Color of the last write at a cell, if any.
    pub fn cell_color(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            self.cell_colors[(y as usize) * (self.width as usize) + x as usize]
        } else {
            None
        }
    }

    /// One row of the grid as a borrowed slice.
    pub fn row(&self, y: u32) -> &[char] {
        let start = (y as usize) * (self.width as usize);
        &self.cells[start..start + self.width as usize]
    }
}
