//! Colouring of schedule grids.

use ansi_term::Colour;

pub const MARKED: &str = "■";
pub const FREE: &str = "·";

/// One slot cell of a schedule grid.
pub fn slot_cell(marked: bool) -> String {
    if marked {
        Colour::Green.paint(MARKED).to_string()
    } else {
        Colour::Fixed(244).paint(FREE).to_string()
    }
}

/// Totals above `limit` hours are shown in red.
pub fn colorize_hours(hours: f64, limit: f64) -> String {
    let text = format!("{hours:.1}h");
    if hours > limit {
        Colour::Red.paint(text).to_string()
    } else {
        text
    }
}
