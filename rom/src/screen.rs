//! The rendering facade.
//!
//! The game never touches VRAM itself; it describes text and digits
//! through [`Screen`] and the platform's rasterizer does the blitting.
//! Rows are in regular-glyph units, columns and fill widths in pixels.
//! Strings may carry inline `#{ci:N}` markers (N = a [`Color`]
//! discriminant) to switch the foreground mid-string, which is how the
//! per-opponent damage entries get their owner's color on one row.

/// Regular text glyph size (the system 8×8 font).
pub const GLYPH_WIDTH: i32 = 8;
pub const GLYPH_HEIGHT: i32 = 8;

/// Large digit glyph size (2-4 player layout).
pub const LARGE_GLYPH_WIDTH: i32 = 30;
pub const LARGE_GLYPH_HEIGHT: i32 = 52;

/// Huge digit glyph size (solo layout).
pub const HUGE_GLYPH_WIDTH: i32 = 60;
pub const HUGE_GLYPH_HEIGHT: i32 = 104;

/// Fixed-capacity buffer for composing a line of text.
pub type TextBuf = heapless::String<256>;

/// Logical colors the rasterizer maps to RGB15.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Green,
    Red,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Orange,
    Purple,
    Fuchsia,
    Lime,
    Cream,
    Gray,
}

/// Fixed per-slot player colors; the first four are the ones with large
/// digit sheets.
pub fn player_color(player: usize) -> Color {
    match player {
        0 => Color::Blue,
        1 => Color::Orange,
        2 => Color::Magenta,
        3 => Color::Green,
        4 => Color::Purple,
        5 => Color::Cyan,
        6 => Color::Cream,
        7 => Color::Yellow,
        _ => Color::White,
    }
}

/// Text and digit output. Implemented by the platform, mocked in tests.
pub trait Screen {
    /// Draw `text` at (`row`, `column`), clearing `fill_width` pixels of
    /// the row first, in the most recently set foreground color.
    /// `mirrored` renders the line upside-down, right-aligned in the fill
    /// region.
    fn print_text(&mut self, row: i32, column: i32, fill_width: i32, mirrored: bool, text: &str);

    /// [`print_text`](Screen::print_text) with the foreground set first.
    fn print_text_color(
        &mut self,
        row: i32,
        column: i32,
        fill_width: i32,
        color: Color,
        mirrored: bool,
        text: &str,
    );

    /// Draw a life total with the 30×52 digit sheet: up to three digits
    /// plus a sign, and a trailing selection dot when `with_dot`.
    fn print_large_number(
        &mut self,
        x: i32,
        y: i32,
        value: i32,
        color: Color,
        mirrored: bool,
        with_dot: bool,
    );

    /// Draw the solo life total with the 60×104 digit sheet, centered.
    fn print_huge_number(&mut self, value: i32);

    /// Wipe the whole screen.
    fn clear(&mut self);
}
