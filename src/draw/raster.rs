//! Pure shape-to-pixel conversion.
//!
//! Each function here maps geometry to a candidate pixel set without ever
//! touching a grid; compositing and bounds clipping happen later in
//! [`super::render`]. The caller owns the returned pixels.

use super::color::Color;
use super::shape::{Shape, ShapeKind};
use std::collections::HashSet;

/// A single rasterized cell candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

/// Converts one shape into its finite pixel set.
///
/// The result is deduplicated by coordinate (first write wins within a
/// single shape) but carries no ordering guarantee beyond that. Degenerate
/// geometry (zero-length lines, zero-radius circles, empty polygons) is not
/// an error; it simply produces a trivial or empty set.
pub fn rasterize(shape: &Shape) -> Vec<Pixel> {
    let mut raw = Vec::new();
    let color = shape.color;

    match &shape.kind {
        ShapeKind::Point { x, y } => raw.push(Pixel { x: *x, y: *y, color }),
        ShapeKind::Line { x1, y1, x2, y2 } => line_pixels(*x1, *y1, *x2, *y2, color, &mut raw),
        ShapeKind::Square { x, y, size } => {
            rect_pixels(*x, *y, *size, *size, shape.fill, color, &mut raw);
        }
        ShapeKind::Rect { x, y, w, h } => {
            rect_pixels(*x, *y, *w, *h, shape.fill, color, &mut raw);
        }
        ShapeKind::Circle { cx, cy, r } => {
            circle_pixels(*cx, *cy, *r, shape.fill, color, &mut raw);
        }
        ShapeKind::Polygon { points } => {
            polygon_pixels(points, shape.fill, color, &mut raw);
        }
        ShapeKind::Curve { p1, p2, p3, p4 } => {
            curve_pixels(*p1, *p2, *p3, *p4, color, &mut raw);
        }
    }

    let mut seen = HashSet::with_capacity(raw.len());
    raw.retain(|p| seen.insert((p.x, p.y)));
    raw
}

/// Bresenham line over all octants.
///
/// Endpoints are canonicalised (lexicographically smaller endpoint first)
/// so tracing (p0, p1) and (p1, p0) yields the same pixel set. Both
/// endpoints are always part of the output.
fn line_pixels(x1: i32, y1: i32, x2: i32, y2: i32, color: Color, out: &mut Vec<Pixel>) {
    let ((x0, y0), (x1, y1)) = if (x2, y2) < (x1, y1) {
        ((x2, y2), (x1, y1))
    } else {
        ((x1, y1), (x2, y2))
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        out.push(Pixel { x, y, color });
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Square/rectangle perimeter, plus the full block when filled.
///
/// Non-positive extents yield the empty set.
fn rect_pixels(x: i32, y: i32, w: i32, h: i32, fill: bool, color: Color, out: &mut Vec<Pixel>) {
    if w <= 0 || h <= 0 {
        return;
    }

    let x2 = x + w - 1;
    let y2 = y + h - 1;

    // Perimeter as four segments between the corners.
    line_pixels(x, y, x2, y, color, out);
    line_pixels(x2, y, x2, y2, color, out);
    line_pixels(x2, y2, x, y2, color, out);
    line_pixels(x, y2, x, y, color, out);

    if fill {
        for py in y..=y2 {
            for px in x..=x2 {
                out.push(Pixel {
                    x: px,
                    y: py,
                    color,
                });
            }
        }
    }
}

/// Midpoint circle outline with 8-way symmetry.
///
/// Radius 0 collapses to the center pixel; a negative radius yields
/// nothing at all.
fn circle_outline(cx: i32, cy: i32, r: i32) -> Vec<(i32, i32)> {
    let mut pts = Vec::new();
    if r < 0 {
        return pts;
    }

    let mut x = 0;
    let mut y = r;
    let mut d = 1 - r;

    while x <= y {
        pts.push((cx + x, cy + y));
        pts.push((cx - x, cy + y));
        pts.push((cx + x, cy - y));
        pts.push((cx - x, cy - y));
        pts.push((cx + y, cy + x));
        pts.push((cx - y, cy + x));
        pts.push((cx + y, cy - x));
        pts.push((cx - y, cy - x));

        if d < 0 {
            d += 2 * x + 3;
        } else {
            d += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }

    pts
}

fn circle_pixels(cx: i32, cy: i32, r: i32, fill: bool, color: Color, out: &mut Vec<Pixel>) {
    let outline = circle_outline(cx, cy, r);

    for &(x, y) in &outline {
        out.push(Pixel { x, y, color });
    }

    if fill {
        // Scan each outline row between its left/right bound.
        let mut rows: std::collections::HashMap<i32, (i32, i32)> = std::collections::HashMap::new();
        for &(x, y) in &outline {
            rows.entry(y)
                .and_modify(|(lo, hi)| {
                    *lo = (*lo).min(x);
                    *hi = (*hi).max(x);
                })
                .or_insert((x, x));
        }
        for (y, (lo, hi)) in rows {
            for x in lo..=hi {
                out.push(Pixel { x, y, color });
            }
        }
    }
}

/// Polygon perimeter (closing last -> first) with optional even-odd
/// scanline fill.
fn polygon_pixels(points: &[(i32, i32)], fill: bool, color: Color, out: &mut Vec<Pixel>) {
    let n = points.len();
    if n < 2 {
        return;
    }

    for i in 0..n {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % n];
        line_pixels(x1, y1, x2, y2, color, out);
    }

    if fill {
        polygon_fill(points, color, out);
    }
}

/// Even-odd scanline fill.
///
/// Per row, x-intersections of crossing edges are collected with half-open
/// vertex intervals (so a vertex shared by two edges counts once), sorted,
/// and the spans between consecutive pairs filled.
fn polygon_fill(points: &[(i32, i32)], color: Color, out: &mut Vec<Pixel>) {
    let min_y = match points.iter().map(|p| p.1).min() {
        Some(v) => v,
        None => return,
    };
    let max_y = points.iter().map(|p| p.1).max().unwrap_or(min_y);
    let n = points.len();

    for y in min_y..=max_y {
        let mut crossings: Vec<f64> = Vec::new();

        for i in 0..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[(i + 1) % n];
            if y1 == y2 {
                continue;
            }
            let crosses = (y1 <= y && y < y2) || (y2 <= y && y < y1);
            if crosses {
                let t = (y - y1) as f64 / (y2 - y1) as f64;
                crossings.push(x1 as f64 + t * (x2 - x1) as f64);
            }
        }

        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        for pair in crossings.chunks_exact(2) {
            let start = pair[0].ceil() as i32;
            let end = pair[1].floor() as i32;
            for x in start..=end {
                out.push(Pixel { x, y, color });
            }
        }
    }
}

/// Cubic Bezier evaluation at parameter `t`.
fn bezier_point(p1: f64, p2: f64, p3: f64, p4: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p1 + 3.0 * u * u * t * p2 + 3.0 * u * t * t * p3 + t * t * t * p4
}

/// Flattens a cubic Bezier into line segments and rasterizes them.
///
/// The sample count scales with the control-point bounding-box diagonal so
/// consecutive samples stay within a pixel of each other; a degenerate
/// curve (all control points equal) still takes one step and lands on a
/// single pixel.
fn curve_pixels(
    p1: (i32, i32),
    p2: (i32, i32),
    p3: (i32, i32),
    p4: (i32, i32),
    color: Color,
    out: &mut Vec<Pixel>,
) {
    let pts = [p1, p2, p3, p4];
    let min_x = pts.iter().map(|p| p.0).min().unwrap_or(0);
    let max_x = pts.iter().map(|p| p.0).max().unwrap_or(0);
    let min_y = pts.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = pts.iter().map(|p| p.1).max().unwrap_or(0);

    let dx = (max_x - min_x) as f64;
    let dy = (max_y - min_y) as f64;
    let diagonal = (dx * dx + dy * dy).sqrt();
    let steps = ((diagonal * 2.0).ceil() as usize).max(1);

    let sample = |t: f64| -> (i32, i32) {
        let x = bezier_point(p1.0 as f64, p2.0 as f64, p3.0 as f64, p4.0 as f64, t);
        let y = bezier_point(p1.1 as f64, p2.1 as f64, p3.1 as f64, p4.1 as f64, t);
        (x.round() as i32, y.round() as i32)
    };

    let mut prev = sample(0.0);
    for i in 1..=steps {
        let next = sample(i as f64 / steps as f64);
        line_pixels(prev.0, prev.1, next.0, next.1, color, out);
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn coords(shape: &Shape) -> HashSet<(i32, i32)> {
        rasterize(shape).iter().map(|p| (p.x, p.y)).collect()
    }

    fn line(id: u64, x1: i32, y1: i32, x2: i32, y2: i32) -> Shape {
        Shape::new(id, ShapeKind::Line { x1, y1, x2, y2 })
    }

    #[test]
    fn point_yields_single_pixel() {
        let shape = Shape::new(1, ShapeKind::Point { x: 3, y: 4 });
        let pixels = rasterize(&shape);
        assert_eq!(pixels.len(), 1);
        assert_eq!((pixels[0].x, pixels[0].y), (3, 4));
    }

    #[test]
    fn line_contains_both_endpoints() {
        for (x1, y1, x2, y2) in [(0, 0, 9, 9), (5, 1, -3, 7), (2, 8, 2, -4), (0, 0, 7, 2)] {
            let set = coords(&line(1, x1, y1, x2, y2));
            assert!(set.contains(&(x1, y1)), "missing start of ({x1},{y1})-({x2},{y2})");
            assert!(set.contains(&(x2, y2)), "missing end of ({x1},{y1})-({x2},{y2})");
        }
    }

    #[test]
    fn line_is_symmetric_under_endpoint_swap() {
        for (x1, y1, x2, y2) in [(0, 0, 9, 3), (-4, 7, 6, -2), (1, 1, 1, 8), (3, 5, 11, 6)] {
            let forward = coords(&line(1, x1, y1, x2, y2));
            let backward = coords(&line(2, x2, y2, x1, y1));
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn line_has_no_gaps_under_8_neighbor_adjacency() {
        let pixels = rasterize(&line(1, 0, 0, 13, 5));
        for pair in pixels.windows(2) {
            let dx = (pair[0].x - pair[1].x).abs();
            let dy = (pair[0].y - pair[1].y).abs();
            assert!(dx <= 1 && dy <= 1, "gap between {:?} and {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn degenerate_line_is_one_pixel() {
        assert_eq!(rasterize(&line(1, 4, 4, 4, 4)).len(), 1);
    }

    #[test]
    fn circle_outline_stays_within_one_of_radius() {
        for r in [0, 1, 2, 3, 7, 10] {
            let shape = Shape::new(1, ShapeKind::Circle { cx: 20, cy: 20, r });
            for (x, y) in coords(&shape) {
                let dist = (((x - 20).pow(2) + (y - 20).pow(2)) as f64).sqrt();
                let rounded = dist.round() as i32;
                assert!(
                    (rounded - r).abs() <= 1,
                    "pixel ({x},{y}) at distance {dist} for radius {r}"
                );
            }
        }
    }

    #[test]
    fn circle_outline_has_eightfold_symmetry() {
        let shape = Shape::new(1, ShapeKind::Circle { cx: 0, cy: 0, r: 5 });
        let set = coords(&shape);
        for &(x, y) in &set {
            assert!(set.contains(&(-x, y)));
            assert!(set.contains(&(x, -y)));
            assert!(set.contains(&(y, x)));
        }
    }

    #[test]
    fn zero_radius_circle_is_center_pixel() {
        let shape = Shape::new(1, ShapeKind::Circle { cx: 3, cy: 7, r: 0 });
        let set = coords(&shape);
        assert_eq!(set, HashSet::from([(3, 7)]));
    }

    #[test]
    fn negative_radius_circle_is_empty() {
        let shape = Shape::new(1, ShapeKind::Circle { cx: 3, cy: 7, r: -2 });
        assert!(rasterize(&shape).is_empty());
    }

    #[test]
    fn filled_shapes_are_supersets_of_outlines() {
        let cases = [
            ShapeKind::Circle { cx: 10, cy: 10, r: 4 },
            ShapeKind::Square { x: 1, y: 1, size: 5 },
            ShapeKind::Rect { x: 0, y: 0, w: 6, h: 3 },
            ShapeKind::Polygon {
                points: vec![(0, 0), (8, 0), (4, 6)],
            },
        ];
        for kind in cases {
            let outline = coords(&Shape::new(1, kind.clone()));
            let mut filled_shape = Shape::new(2, kind);
            filled_shape.fill = true;
            let filled = coords(&filled_shape);
            assert!(
                outline.is_subset(&filled),
                "outline not contained in fill for {:?}",
                filled_shape.kind.variant_name()
            );
        }
    }

    #[test]
    fn filled_square_is_exact_block() {
        let mut shape = Shape::new(1, ShapeKind::Square { x: 1, y: 1, size: 3 });
        shape.fill = true;
        let set = coords(&shape);
        let mut expected = HashSet::new();
        for y in 1..=3 {
            for x in 1..=3 {
                expected.insert((x, y));
            }
        }
        assert_eq!(set, expected);
    }

    #[test]
    fn non_positive_extent_rectangles_are_empty() {
        assert!(rasterize(&Shape::new(1, ShapeKind::Square { x: 0, y: 0, size: 0 })).is_empty());
        assert!(rasterize(&Shape::new(2, ShapeKind::Rect { x: 0, y: 0, w: -3, h: 2 })).is_empty());
    }

    #[test]
    fn polygon_closes_last_vertex_to_first() {
        let shape = Shape::new(1, ShapeKind::Polygon {
            points: vec![(0, 0), (4, 0), (4, 4)],
        });
        let set = coords(&shape);
        // Closing edge (4,4) -> (0,0) runs along the diagonal.
        assert!(set.contains(&(2, 2)));
    }

    #[test]
    fn empty_and_single_vertex_polygons_yield_nothing() {
        assert!(rasterize(&Shape::new(1, ShapeKind::Polygon { points: vec![] })).is_empty());
        assert!(
            rasterize(&Shape::new(2, ShapeKind::Polygon {
                points: vec![(3, 3)],
            }))
            .is_empty()
        );
    }

    #[test]
    fn filled_triangle_covers_interior() {
        let mut shape = Shape::new(1, ShapeKind::Polygon {
            points: vec![(0, 0), (10, 0), (5, 8)],
        });
        shape.fill = true;
        let set = coords(&shape);
        assert!(set.contains(&(5, 3)));
        assert!(set.contains(&(5, 1)));
        assert!(!set.contains(&(0, 8)));
    }

    #[test]
    fn degenerate_curve_is_exactly_one_pixel() {
        let shape = Shape::new(1, ShapeKind::Curve {
            p1: (5, 5),
            p2: (5, 5),
            p3: (5, 5),
            p4: (5, 5),
        });
        let pixels = rasterize(&shape);
        assert_eq!(pixels.len(), 1);
        assert_eq!((pixels[0].x, pixels[0].y), (5, 5));
    }

    #[test]
    fn curve_endpoints_are_sampled() {
        let shape = Shape::new(1, ShapeKind::Curve {
            p1: (0, 0),
            p2: (5, 10),
            p3: (15, -5),
            p4: (20, 8),
        });
        let set = coords(&shape);
        assert!(set.contains(&(0, 0)));
        assert!(set.contains(&(20, 8)));
    }

    #[test]
    fn curve_is_connected() {
        let shape = Shape::new(1, ShapeKind::Curve {
            p1: (0, 0),
            p2: (10, 20),
            p3: (30, -10),
            p4: (40, 10),
        });
        let set = coords(&shape);
        for &(x, y) in &set {
            if (x, y) == (0, 0) {
                continue;
            }
            let has_neighbor = (-1..=1).any(|dx| {
                (-1..=1).any(|dy| (dx, dy) != (0, 0) && set.contains(&(x + dx, y + dy)))
            });
            assert!(has_neighbor, "isolated pixel ({x},{y})");
        }
    }

    #[test]
    fn rasterize_deduplicates_pixels() {
        let shape = Shape::new(1, ShapeKind::Square { x: 0, y: 0, size: 2 });
        let pixels = rasterize(&shape);
        let set: HashSet<(i32, i32)> = pixels.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(pixels.len(), set.len());
    }

    #[test]
    fn pixels_carry_the_shape_color() {
        let mut shape = line(1, 0, 0, 3, 3);
        shape.color = Color::Red;
        assert!(rasterize(&shape).iter().all(|p| p.color == Color::Red));
    }
}
