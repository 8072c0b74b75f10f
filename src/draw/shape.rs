//! Shape definitions for the drawing canvas.

use super::color::Color;
use std::fmt;

/// Geometry payload of a shape, one variant per drawing primitive.
///
/// All coordinates are integer grid positions. Geometry is stored inline;
/// no validation is performed on construction (negative lengths and radii
/// are accepted and simply rasterize to trivial or empty pixel sets).
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// Single grid cell
    Point { x: i32, y: i32 },
    /// Straight segment between two endpoints
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Axis-aligned square anchored at its top-left corner
    Square { x: i32, y: i32, size: i32 },
    /// Axis-aligned rectangle anchored at its top-left corner
    Rect { x: i32, y: i32, w: i32, h: i32 },
    /// Circle given by center and radius
    Circle { cx: i32, cy: i32, r: i32 },
    /// Implicitly closed polygon over an ordered vertex list (N >= 0)
    Polygon { points: Vec<(i32, i32)> },
    /// Cubic Bezier curve over four control points
    Curve {
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        p4: (i32, i32),
    },
}

impl ShapeKind {
    /// Short variant name used in listings.
    pub fn variant_name(&self) -> &'static str {
        match self {
            ShapeKind::Point { .. } => "point",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Square { .. } => "square",
            ShapeKind::Rect { .. } => "rectangle",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Polygon { .. } => "polygon",
            ShapeKind::Curve { .. } => "curve",
        }
    }
}

/// A drawable shape: geometry plus rendering attributes.
///
/// The `id` is handed out by [`crate::id::IdGenerator`] and is unique across
/// the process lifetime (and across restarts, since the counter is
/// persisted). A shape is owned by exactly one [`super::Layer`] at a time.
#[derive(Clone, Debug)]
pub struct Shape {
    /// Process-wide unique identifier
    pub id: u64,
    /// Variant-specific geometry
    pub kind: ShapeKind,
    /// Outline only (false) or filled (true)
    pub fill: bool,
    /// Stroke thickness; informational, not consulted by the rasterizer
    pub thickness: f64,
    /// Draw color
    pub color: Color,
    /// Rotation angle in degrees; stored and listed but currently inert
    pub rotation: f64,
}

impl Shape {
    /// Creates a shape with default attributes (outline, thickness 1, black).
    pub fn new(id: u64, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            fill: false,
            thickness: 1.0,
            color: Color::Black,
            rotation: 0.0,
        }
    }

    /// Creates a shape with explicit attributes.
    pub fn with_attrs(id: u64, kind: ShapeKind, fill: bool, thickness: f64, color: Color) -> Self {
        Self {
            id,
            kind,
            fill,
            thickness,
            color,
            rotation: 0.0,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.id)?;
        match &self.kind {
            ShapeKind::Point { x, y } => write!(f, "point ({x}, {y})")?,
            ShapeKind::Line { x1, y1, x2, y2 } => {
                write!(f, "line ({x1}, {y1}) -> ({x2}, {y2})")?;
            }
            ShapeKind::Square { x, y, size } => {
                write!(f, "square ({x}, {y}) size {size}")?;
            }
            ShapeKind::Rect { x, y, w, h } => {
                write!(f, "rectangle ({x}, {y}) {w}x{h}")?;
            }
            ShapeKind::Circle { cx, cy, r } => {
                write!(f, "circle center ({cx}, {cy}) radius {r}")?;
            }
            ShapeKind::Polygon { points } => {
                write!(f, "polygon")?;
                for (x, y) in points {
                    write!(f, " ({x}, {y})")?;
                }
            }
            ShapeKind::Curve { p1, p2, p3, p4 } => {
                write!(
                    f,
                    "curve ({}, {}) ({}, {}) ({}, {}) ({}, {})",
                    p1.0, p1.1, p2.0, p2.1, p3.0, p3.1, p4.0, p4.1
                )?;
            }
        }
        write!(
            f,
            " [color={} fill={} thickness={:.1}]",
            self.color,
            if self.fill { "yes" } else { "no" },
            self.thickness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_each_variant() {
        let line = Shape::new(3, ShapeKind::Line {
            x1: 0,
            y1: 0,
            x2: 9,
            y2: 9,
        });
        let text = line.to_string();
        assert!(text.starts_with("[3] line (0, 0) -> (9, 9)"));
        assert!(text.contains("color=black"));

        let poly = Shape::new(4, ShapeKind::Polygon {
            points: vec![(0, 0), (4, 0), (2, 3)],
        });
        assert!(poly.to_string().contains("polygon (0, 0) (4, 0) (2, 3)"));
    }

    #[test]
    fn new_applies_default_attributes() {
        let shape = Shape::new(1, ShapeKind::Point { x: 2, y: 2 });
        assert!(!shape.fill);
        assert_eq!(shape.color, Color::Black);
        assert_eq!(shape.rotation, 0.0);
        assert_eq!(shape.kind.variant_name(), "point");
    }
}
