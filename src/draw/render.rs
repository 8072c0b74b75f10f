//! Layer compositing and terminal output.

use super::area::Area;
use super::color::ANSI_RESET;
use super::raster::{Pixel, rasterize};
use std::io::{self, Write};

/// Output options for [`draw_area`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawOptions {
    /// Wrap filled cells in their color's ANSI escape
    pub ansi_colors: bool,
    /// Emit a screen clear before the grid
    pub clear_screen: bool,
}

/// Rebuilds an area's grid from its layers.
///
/// Clears the grid, then composites every visible layer in z-order, each
/// layer's shapes in insertion order. Later writes overwrite earlier ones,
/// so the topmost contribution wins per cell. Pixels outside the grid are
/// dropped by `set_cell`.
pub fn render_area(area: &mut Area) {
    // Collect first, write second: layers can't be borrowed while the grid
    // is being mutated.
    let mut writes: Vec<Pixel> = Vec::new();
    for layer in &area.layers {
        if !layer.visible {
            continue;
        }
        for shape in &layer.shapes {
            writes.extend(rasterize(shape));
        }
    }

    area.clear_grid();
    let full = area.full_char;
    for pixel in writes {
        area.set_cell(pixel.x, pixel.y, full, Some(pixel.color));
    }
}

/// Prints the grid row by row.
///
/// Rows are `width` characters wide, separated by newlines only. When
/// `ansi_colors` is set, cells that took a colored write are wrapped in the
/// color's escape sequence.
pub fn draw_area<W: Write>(area: &Area, out: &mut W, opts: &DrawOptions) -> io::Result<()> {
    if opts.clear_screen {
        clear_screen(out)?;
    }

    for y in 0..area.height {
        if opts.ansi_colors {
            for (x, ch) in area.row(y).iter().enumerate() {
                match area.cell_color(x as i32, y as i32) {
                    Some(color) => write!(out, "{}{}{}", color.ansi_fg(), ch, ANSI_RESET)?,
                    None => write!(out, "{ch}")?,
                }
            }
        } else {
            let row: String = area.row(y).iter().collect();
            write!(out, "{row}")?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// ANSI clear-screen plus cursor home.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[2J\x1b[H")
}
