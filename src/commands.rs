//! Line-oriented command parsing and dispatch for the interactive shell.
//!
//! Commands mutate the [`App`] state and write their human-readable output
//! to a caller-provided sink. Errors are values reported to the user; a bad
//! command never aborts the session.

use crate::app::App;
use crate::draw::{Color, DrawOptions, ShapeKind, clear_screen, draw_area, render_area};
use std::io::Write;
use thiserror::Error;

/// Errors surfaced to the user by the command layer.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid number")]
    BadNumber(String),

    #[error("'{0}' is not a valid color (black, white, red, green)")]
    BadColor(String),

    #[error("no active area (create one with 'new area')")]
    NoActiveArea,

    #[error("no active layer (create one with 'new layer')")]
    NoActiveLayer,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What the caller should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

const HELP: &str = "\
Controls:
  help                                show this help
  exit                                quit the application
  clear                               clear the screen
  plot                                render and print the current area

Draw shapes (into the current layer):
  point px py                         point at (px, py)
  line x1 y1 x2 y2                    line from (x1, y1) to (x2, y2)
  square x y l                        square at (x, y) with side l
  rectangle x y w h                   rectangle at (x, y), w wide and h tall
  circle x y r                        circle centered at (x, y) with radius r
  polygon x1 y1 x2 y2 ...             closed polygon over the given vertices
  curve x1 y1 x2 y2 x3 y3 x4 y4       cubic Bezier over four control points

Manage elements:
  list {areas, layers, shapes}        list elements
  select {area, layer, shape} <id>    select an element by id
  new {area, layer} [name]            create a new element
  delete {area, layer, shape} <id>    delete an element by id

Configuration:
  set char {border, background} <c>   change a grid character (char or code)
  set layer {visible, hidden} <id>    change a layer's visibility
  set color {black,white,red,green}   color for new shapes
  set fill {on, off}                  fill flag for new shapes
  set thickness <t>                   thickness for new shapes";

/// Parses and executes one command line.
pub fn execute<W: Write>(
    app: &mut App,
    line: &str,
    out: &mut W,
    opts: &DrawOptions,
) -> Result<Outcome, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = tokens.split_first() else {
        return Ok(Outcome::Continue);
    };

    match name.to_lowercase().as_str() {
        "help" => writeln!(out, "{HELP}")?,
        "exit" | "quit" => return Ok(Outcome::Quit),
        "clear" => clear_screen(out)?,
        "plot" => plot(app, out, opts)?,

        "point" => {
            let [x, y] = parse_ints(args, "point px py")?;
            created(out, app, ShapeKind::Point { x, y })?;
        }
        "line" => {
            let [x1, y1, x2, y2] = parse_ints(args, "line x1 y1 x2 y2")?;
            created(out, app, ShapeKind::Line { x1, y1, x2, y2 })?;
        }
        "square" => {
            let [x, y, size] = parse_ints(args, "square x y l")?;
            created(out, app, ShapeKind::Square { x, y, size })?;
        }
        "rectangle" => {
            let [x, y, w, h] = parse_ints(args, "rectangle x y w h")?;
            created(out, app, ShapeKind::Rect { x, y, w, h })?;
        }
        "circle" => {
            let [cx, cy, r] = parse_ints(args, "circle x y r")?;
            created(out, app, ShapeKind::Circle { cx, cy, r })?;
        }
        "polygon" => {
            const USAGE: &str = "polygon x1 y1 x2 y2 ...";
            if args.is_empty() || args.len() % 2 != 0 {
                return Err(CommandError::Usage(USAGE));
            }
            let mut points = Vec::with_capacity(args.len() / 2);
            for pair in args.chunks_exact(2) {
                points.push((parse_i32(pair[0])?, parse_i32(pair[1])?));
            }
            created(out, app, ShapeKind::Polygon { points })?;
        }
        "curve" => {
            let [x1, y1, x2, y2, x3, y3, x4, y4] =
                parse_ints(args, "curve x1 y1 x2 y2 x3 y3 x4 y4")?;
            created(out, app, ShapeKind::Curve {
                p1: (x1, y1),
                p2: (x2, y2),
                p3: (x3, y3),
                p4: (x4, y4),
            })?;
        }

        "list" => list(app, args, out)?,
        "select" => select(app, args, out)?,
        "new" => new_element(app, args, out)?,
        "delete" => delete(app, args, out)?,
        "set" => set(app, args, out)?,

        other => return Err(CommandError::Unknown(other.to_string())),
    }

    Ok(Outcome::Continue)
}

fn plot<W: Write>(app: &mut App, out: &mut W, opts: &DrawOptions) -> Result<(), CommandError> {
    let area = app.current_area_mut().ok_or(CommandError::NoActiveArea)?;
    render_area(area);
    draw_area(area, out, opts)?;
    Ok(())
}

fn created<W: Write>(out: &mut W, app: &mut App, kind: ShapeKind) -> Result<(), CommandError> {
    let variant = kind.variant_name();
    let id = app.add_shape(kind).ok_or(CommandError::NoActiveLayer)?;
    writeln!(out, "created {variant} with id {id}")?;
    Ok(())
}

fn list<W: Write>(app: &App, args: &[&str], out: &mut W) -> Result<(), CommandError> {
    const USAGE: &str = "list {areas, layers, shapes}";
    match args.first().map(|s| s.to_lowercase()).as_deref() {
        Some("areas") => {
            writeln!(out, "Areas:")?;
            for area in &app.areas {
                let marker = if app.current_area == Some(area.id) {
                    " *"
                } else {
                    ""
                };
                writeln!(
                    out,
                    "  [{}] {} ({}x{}){marker}",
                    area.id, area.name, area.width, area.height
                )?;
            }
        }
        Some("layers") => {
            let area = app.current_area().ok_or(CommandError::NoActiveArea)?;
            writeln!(out, "Layers of area {}:", area.id)?;
            for layer in &area.layers {
                let marker = if app.current_layer == Some(layer.id) {
                    " *"
                } else {
                    ""
                };
                let visibility = if layer.visible { "visible" } else { "hidden" };
                writeln!(
                    out,
                    "  [{}] {} ({visibility}, {} shapes){marker}",
                    layer.id,
                    layer.name,
                    layer.shapes.len()
                )?;
            }
        }
        Some("shapes") => {
            let layer = app.current_layer().ok_or(CommandError::NoActiveLayer)?;
            writeln!(out, "Shapes of layer {}:", layer.id)?;
            for shape in &layer.shapes {
                let marker = if app.current_shape == Some(shape.id) {
                    " *"
                } else {
                    ""
                };
                writeln!(out, "  {shape}{marker}")?;
            }
        }
        _ => return Err(CommandError::Usage(USAGE)),
    }
    Ok(())
}

fn select<W: Write>(app: &mut App, args: &[&str], out: &mut W) -> Result<(), CommandError> {
    const USAGE: &str = "select {area, layer, shape} <id>";
    let (&target, rest) = args.split_first().ok_or(CommandError::Usage(USAGE))?;
    let id = parse_id(rest, USAGE)?;

    let (selected, entity) = match target.to_lowercase().as_str() {
        "area" => (app.select_area(id), "area"),
        "layer" => (app.select_layer(id), "layer"),
        "shape" => (app.select_shape(id), "shape"),
        _ => return Err(CommandError::Usage(USAGE)),
    };

    if !selected {
        return Err(CommandError::NotFound { entity, id });
    }
    writeln!(out, "selected {entity} {id}")?;
    Ok(())
}

fn new_element<W: Write>(app: &mut App, args: &[&str], out: &mut W) -> Result<(), CommandError> {
    const USAGE: &str = "new {area, layer} [name]";
    let (&target, rest) = args.split_first().ok_or(CommandError::Usage(USAGE))?;

    match target.to_lowercase().as_str() {
        "area" => {
            let name = if rest.is_empty() {
                "New Area".to_string()
            } else {
                rest.join(" ")
            };
            let (width, height) = app.default_dimensions();
            let id = app.create_area(width, height, name);
            writeln!(out, "created area {id} ({width}x{height})")?;
        }
        "layer" => {
            let name = if rest.is_empty() {
                "New Layer".to_string()
            } else {
                rest.join(" ")
            };
            let id = app.create_layer(name).ok_or(CommandError::NoActiveArea)?;
            writeln!(out, "created layer {id}")?;
        }
        _ => return Err(CommandError::Usage(USAGE)),
    }
    Ok(())
}

fn delete<W: Write>(app: &mut App, args: &[&str], out: &mut W) -> Result<(), CommandError> {
    const USAGE: &str = "delete {area, layer, shape} <id>";
    let (&target, rest) = args.split_first().ok_or(CommandError::Usage(USAGE))?;
    let id = parse_id(rest, USAGE)?;

    let (removed, entity) = match target.to_lowercase().as_str() {
        "area" => (app.remove_area(id), "area"),
        "layer" => (app.remove_layer(id), "layer"),
        "shape" => (app.remove_shape(id), "shape"),
        _ => return Err(CommandError::Usage(USAGE)),
    };

    if !removed {
        return Err(CommandError::NotFound { entity, id });
    }
    writeln!(out, "deleted {entity} {id}")?;
    Ok(())
}

fn set<W: Write>(app: &mut App, args: &[&str], out: &mut W) -> Result<(), CommandError> {
    const USAGE: &str =
        "set {char, layer, color, fill, thickness} ... (see 'help' for the full forms)";
    let (&target, rest) = args.split_first().ok_or(CommandError::Usage(USAGE))?;

    match target.to_lowercase().as_str() {
        "char" => {
            const CHAR_USAGE: &str = "set char {border, background} <char-or-code>";
            let [which, value] = rest else {
                return Err(CommandError::Usage(CHAR_USAGE));
            };
            let ch = parse_char(value)?;
            let area = app.current_area_mut().ok_or(CommandError::NoActiveArea)?;
            match which.to_lowercase().as_str() {
                "border" => area.full_char = ch,
                "background" => area.empty_char = ch,
                _ => return Err(CommandError::Usage(CHAR_USAGE)),
            }
            writeln!(out, "set {which} character to '{ch}'")?;
        }
        "layer" => {
            const LAYER_USAGE: &str = "set layer {visible, hidden} <id>";
            let [state, id] = rest else {
                return Err(CommandError::Usage(LAYER_USAGE));
            };
            let visible = match state.to_lowercase().as_str() {
                "visible" => true,
                "hidden" | "invisible" => false,
                _ => return Err(CommandError::Usage(LAYER_USAGE)),
            };
            let id = parse_u64(id)?;
            let area = app.current_area_mut().ok_or(CommandError::NoActiveArea)?;
            let layer = area
                .find_layer_mut(id)
                .ok_or(CommandError::NotFound { entity: "layer", id })?;
            layer.set_visible(visible);
            writeln!(out, "layer {id} is now {}", if visible { "visible" } else { "hidden" })?;
        }
        "color" => {
            let [name] = rest else {
                return Err(CommandError::Usage("set color {black, white, red, green}"));
            };
            let color =
                Color::from_name(name).ok_or_else(|| CommandError::BadColor(name.to_string()))?;
            app.draw_color = color;
            writeln!(out, "drawing color set to {color}")?;
        }
        "fill" => {
            let [state] = rest else {
                return Err(CommandError::Usage("set fill {on, off}"));
            };
            app.draw_fill = match state.to_lowercase().as_str() {
                "on" => true,
                "off" => false,
                _ => return Err(CommandError::Usage("set fill {on, off}")),
            };
            writeln!(out, "fill is now {}", if app.draw_fill { "on" } else { "off" })?;
        }
        "thickness" => {
            let [value] = rest else {
                return Err(CommandError::Usage("set thickness <t>"));
            };
            let t: f64 = value
                .parse()
                .map_err(|_| CommandError::BadNumber(value.to_string()))?;
            app.draw_thickness = t;
            writeln!(out, "thickness set to {t:.1}")?;
        }
        _ => return Err(CommandError::Usage(USAGE)),
    }
    Ok(())
}

// ============================================================================
// Parameter parsing helpers
// ============================================================================

fn parse_i32(token: &str) -> Result<i32, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::BadNumber(token.to_string()))
}

fn parse_u64(token: &str) -> Result<u64, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::BadNumber(token.to_string()))
}

fn parse_ints<const N: usize>(args: &[&str], usage: &'static str) -> Result<[i32; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::Usage(usage));
    }
    let mut values = [0i32; N];
    for (slot, token) in values.iter_mut().zip(args) {
        *slot = parse_i32(token)?;
    }
    Ok(values)
}

fn parse_id(args: &[&str], usage: &'static str) -> Result<u64, CommandError> {
    match args {
        [token] => parse_u64(token),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// Accepts either a literal single character or a numeric character code
/// (so both `set char border #` and `set char border 35` work).
fn parse_char(token: &str) -> Result<char, CommandError> {
    let mut chars = token.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && !ch.is_ascii_digit()
    {
        return Ok(ch);
    }
    let code: u32 = token
        .parse()
        .map_err(|_| CommandError::BadNumber(token.to_string()))?;
    char::from_u32(code).ok_or_else(|| CommandError::BadNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::id::IdGenerator;

    fn test_app() -> App {
        let dir = tempfile::tempdir().unwrap();
        let ids = IdGenerator::load(dir.path().join("next_id")).unwrap();
        App::new(&Config::default(), ids)
    }

    fn run(app: &mut App, line: &str) -> Result<(String, Outcome), CommandError> {
        let mut out = Vec::new();
        let outcome = execute(app, line, &mut out, &DrawOptions::default())?;
        Ok((String::from_utf8(out).unwrap(), outcome))
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let mut app = test_app();
        let (output, outcome) = run(&mut app, "   ").unwrap();
        assert!(output.is_empty());
        assert_eq!(outcome, Outcome::Continue);
    }

    #[test]
    fn exit_and_quit_stop_the_loop() {
        let mut app = test_app();
        assert_eq!(run(&mut app, "exit").unwrap().1, Outcome::Quit);
        assert_eq!(run(&mut app, "quit").unwrap().1, Outcome::Quit);
    }

    #[test]
    fn shape_commands_create_into_the_current_layer() {
        let mut app = test_app();
        let (output, _) = run(&mut app, "line 0 0 9 9").unwrap();
        assert!(output.starts_with("created line"));
        assert_eq!(app.current_layer().unwrap().shapes.len(), 1);
        assert!(app.current_shape.is_some());

        run(&mut app, "circle 5 5 3").unwrap();
        run(&mut app, "polygon 0 0 4 0 2 3").unwrap();
        run(&mut app, "curve 0 0 1 5 8 5 9 0").unwrap();
        assert_eq!(app.current_layer().unwrap().shapes.len(), 4);
    }

    #[test]
    fn bad_parameters_are_reported_not_fatal() {
        let mut app = test_app();
        assert!(matches!(
            run(&mut app, "line 0 0 9"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            run(&mut app, "point a b"),
            Err(CommandError::BadNumber(_))
        ));
        assert!(matches!(
            run(&mut app, "polygon 0 0 4"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            run(&mut app, "frobnicate"),
            Err(CommandError::Unknown(_))
        ));
        // App state untouched by the failures above.
        assert_eq!(app.current_layer().unwrap().shapes.len(), 0);
    }

    #[test]
    fn plot_prints_the_rendered_grid() {
        let mut app = test_app();
        run(&mut app, "new area tiny").unwrap();
        // Shrink by hand: areas from config are 80x40, too big to assert on.
        let area = app.current_area_mut().unwrap();
        *area = crate::draw::Area::new(3, 3, area.id, "tiny");
        app.create_layer("l").unwrap();
        run(&mut app, "point 1 1").unwrap();

        let (output, _) = run(&mut app, "plot").unwrap();
        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(rows, vec!["...", ".#.", "..."]);
    }

    #[test]
    fn delete_reports_not_found_without_mutating() {
        let mut app = test_app();
        run(&mut app, "point 1 1").unwrap();
        let err = run(&mut app, "delete shape 999").unwrap_err();
        assert!(matches!(err, CommandError::NotFound { entity: "shape", .. }));
        assert_eq!(app.current_layer().unwrap().shapes.len(), 1);
    }

    #[test]
    fn select_and_delete_round_trip() {
        let mut app = test_app();
        run(&mut app, "point 1 1").unwrap();
        let shape_id = app.current_shape.unwrap();

        run(&mut app, &format!("select shape {shape_id}")).unwrap();
        run(&mut app, &format!("delete shape {shape_id}")).unwrap();
        assert!(app.current_shape.is_none());
    }

    #[test]
    fn new_area_becomes_current_with_default_layer() {
        let mut app = test_app();
        let (output, _) = run(&mut app, "new area my canvas").unwrap();
        assert!(output.starts_with("created area"));
        assert_eq!(app.current_area().unwrap().name, "my canvas");
        assert_eq!(app.current_area().unwrap().layers.len(), 1);
    }

    #[test]
    fn set_layer_visibility_by_id() {
        let mut app = test_app();
        let layer_id = app.current_layer.unwrap();
        run(&mut app, &format!("set layer hidden {layer_id}")).unwrap();
        assert!(!app.current_layer().unwrap().visible);
        run(&mut app, &format!("set layer visible {layer_id}")).unwrap();
        assert!(app.current_layer().unwrap().visible);
    }

    #[test]
    fn set_char_changes_grid_characters() {
        let mut app = test_app();
        run(&mut app, "set char border @").unwrap();
        run(&mut app, "set char background 32").unwrap();
        let area = app.current_area().unwrap();
        assert_eq!(area.full_char, '@');
        assert_eq!(area.empty_char, ' ');
    }

    #[test]
    fn set_drawing_defaults_apply_to_new_shapes() {
        let mut app = test_app();
        run(&mut app, "set color green").unwrap();
        run(&mut app, "set fill on").unwrap();
        run(&mut app, "circle 4 4 2").unwrap();

        let shape = app.current_layer().unwrap().shapes.last().unwrap();
        assert_eq!(shape.color, Color::Green);
        assert!(shape.fill);

        assert!(matches!(
            run(&mut app, "set color mauve"),
            Err(CommandError::BadColor(_))
        ));
    }

    #[test]
    fn list_outputs_mark_current_entities() {
        let mut app = test_app();
        run(&mut app, "point 1 1").unwrap();
        let (areas, _) = run(&mut app, "list areas").unwrap();
        assert!(areas.contains("Area1"));
        assert!(areas.contains('*'));

        let (shapes, _) = run(&mut app, "list shapes").unwrap();
        assert!(shapes.contains("point (1, 1)"));
    }
}
