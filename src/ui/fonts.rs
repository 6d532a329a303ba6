//! The four u8g2 faces used by the screens.

use embedded_graphics::prelude::Point;
use u8g2_fonts::types::VerticalPosition;
use u8g2_fonts::{fonts, FontRenderer};

const SMALL: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_6x10_tr>().with_ignore_unknown_chars(true);
const BOLD: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_7x14B_tr>().with_ignore_unknown_chars(true);
const LARGE: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_fub14_tr>().with_ignore_unknown_chars(true);
const HUGE: FontRenderer =
    FontRenderer::new::<fonts::u8g2_font_logisoso32_tr>().with_ignore_unknown_chars(true);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 6×10 labels, date, countdown.
    Small,
    /// 7×14 bold direction text.
    Bold,
    /// 14 px proportional distance.
    Large,
    /// 32 px clock digits.
    Huge,
}

impl Font {
    pub fn renderer(self) -> &'static FontRenderer {
        match self {
            Font::Small => &SMALL,
            Font::Bold => &BOLD,
            Font::Large => &LARGE,
            Font::Huge => &HUGE,
        }
    }

    /// Horizontal advance of `text` in pixels.
    pub fn text_width(self, text: &str) -> u32 {
        self.renderer()
            .get_rendered_dimensions(text, Point::zero(), VerticalPosition::Baseline)
            .map(|dims| dims.advance.x.max(0) as u32)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_faces_advance_per_char() {
        assert_eq!(Font::Small.text_width("Sleep in 9s"), 11 * 6);
        assert_eq!(Font::Bold.text_width("Turn left"), 9 * 7);
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(Font::Large.text_width(""), 0);
    }
}
