//! Level tag mapping and colour selection
//!
//! Levels are plain integers 1-5 (higher = more verbose). Anything outside
//! that range formats with the generic `LOG` tag rather than being rejected.

use colored::Color;

/// Map a level to its tag word.
#[must_use]
pub fn tag(level: u8) -> &'static str {
    match level {
        1 => "ONE",
        2 => "TWO",
        3 => "THREE",
        4 => "FOUR",
        5 => "FIVE",
        _ => "LOG",
    }
}

/// Map a level to its bracketed tag, e.g. `[THREE]`.
#[must_use]
pub fn bracketed_tag(level: u8) -> String {
    format!("[{}]", tag(level))
}

/// Terminal colour keyed by level; `None` for out-of-range levels, which are
/// printed uncoloured.
#[must_use]
pub fn colour(level: u8) -> Option<Color> {
    match level {
        1 => Some(Color::Red),
        2 => Some(Color::Magenta),
        3 => Some(Color::Yellow),
        4 => Some(Color::Green),
        5 => Some(Color::Cyan),
        _ => None,
    }
}
