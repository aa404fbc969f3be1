//! Map canvas: rooms at their authored positions, corridors between
//! neighbors, markers for the player, monsters, and treasure.

use fable_core::{PcgRng, Session};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};

/// Authored positions are pixel-ish coordinates on a notional layout of
/// this size; the canvas scales them to the terminal cell grid.
const WORLD_WIDTH: f64 = 1000.0;
const WORLD_HEIGHT: f64 = 800.0;

pub fn render(frame: &mut Frame, area: Rect, session: &Session<PcgRng>, title: &str) {
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, WORLD_WIDTH])
        .y_bounds([0.0, WORLD_HEIGHT])
        .paint(|ctx| paint(ctx, session));
    frame.render_widget(canvas, area);
}

fn paint(ctx: &mut Context, session: &Session<PcgRng>) {
    let world = session.world();
    let here = session.location();

    // Corridors first so room markers draw over them.
    for def in world.defs() {
        let (x1, y1) = scale(def.position);
        for &neighbor in def.neighbors {
            // Each symmetric pair is drawn once.
            if neighbor.index() <= def.id.index() {
                continue;
            }
            if let Ok(other) = world.def(neighbor) {
                let (x2, y2) = scale(other.position);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: Color::DarkGray,
                });
            }
        }
    }

    ctx.layer();

    for def in world.defs() {
        let (x, y) = scale(def.position);
        let visited = world.is_visited(def.id).unwrap_or(false);
        let guarded = world.monster_hp(def.id).unwrap_or(0) > 0;
        let treasure = world.has_treasure(def.id).unwrap_or(false);

        let color = if def.id == here {
            Color::Cyan
        } else if guarded {
            Color::Red
        } else if treasure {
            Color::Yellow
        } else if visited {
            Color::Green
        } else {
            Color::Gray
        };
        ctx.draw(&Points {
            coords: &[(x, y)],
            color,
        });
        ctx.print(x, y + 30.0, room_label(def.name, def.id == here, color));
    }
}

fn scale(position: (u16, u16)) -> (f64, f64) {
    // Authored coordinates grow downward; the canvas grows upward.
    (
        f64::from(position.0),
        WORLD_HEIGHT - f64::from(position.1),
    )
}

fn room_label(name: &str, current: bool, color: Color) -> ratatui::text::Line<'static> {
    use ratatui::style::Style;
    use ratatui::text::{Line, Span};
    let text = if current {
        format!("[{name}]")
    } else {
        name.to_string()
    };
    Line::from(Span::styled(text, Style::default().fg(color)))
}
