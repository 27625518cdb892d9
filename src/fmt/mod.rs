//! Console rendering pieces: colors, level glyphs, quoting and attribute rendering.

mod color;
mod glyph;
mod quote;
mod render;

pub use color::{Color, LevelStyles, Style};
pub use glyph::GlyphSet;
pub use quote::{append_string, needs_quoting, quote};
pub use render::{AttrRenderer, append_value};
