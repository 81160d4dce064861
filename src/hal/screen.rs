//! Display collaborator.

use super::HalError;

/// Monochrome pixel color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

/// Glyph metrics of a fixed-width font.
///
/// Rasterisation is the screen's business; layout code only needs the
/// cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub width: u32,
    pub height: u32,
}

/// The 5x8 font the firmware renders everything with.
pub const FONT_8X5: Font = Font {
    width: 5,
    height: 8,
};

impl Default for Font {
    fn default() -> Self {
        FONT_8X5
    }
}

/// A small monochrome screen with batched rendering.
///
/// Drawing calls are buffered; nothing becomes visible until
/// [`update`](Screen::update) commits the frame.
pub trait Screen {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn clear(&mut self) -> Result<(), HalError>;

    /// Draw `text` with its top-left corner at `(x, y)`, each font pixel
    /// scaled to a `scale` x `scale` block.
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        scale: u32,
        text: &str,
        color: Color,
    ) -> Result<(), HalError>;

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), HalError>;

    fn set_contrast(&mut self, level: u8) -> Result<(), HalError>;

    /// Commit buffered drawing.
    fn update(&mut self) -> Result<(), HalError>;
}
