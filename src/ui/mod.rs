//! User interface subsystem - OLED screens.
//!
//! Each render tick picks one [`DisplayMode`](crate::mode::DisplayMode),
//! composes its layout into a drawing plan and paints the plan on the
//! panel in one clear / draw / flush cycle.
//!
//! ## Components
//!
//! - **Layout**: screen plans (notification, navigation, clock, messages)
//! - **Painter**: executes plans via `embedded-graphics` + `u8g2-fonts`
//! - **Display**: SSD1306 128×64 OLED via I²C (`display.rs`, embedded only)
//! - **Button**: wake / activity button (`buttons.rs`, embedded only)

pub mod fonts;
pub mod framebuffer;
pub mod layout;
pub mod painter;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

use crate::config::RENDER_PERIOD_MS;
use crate::context::Context;
use crate::error::Error;
use layout::Scene;

/// A buffered monochrome display.
///
/// Drawing goes into an off-screen buffer; nothing is visible until
/// [`flush`](Panel::flush).
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Clear the draw buffer.
    fn begin_frame(&mut self);

    /// Push the draw buffer to the glass.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Clear, draw `scene`, flush.
pub fn present<P: Panel>(scene: &Scene<'_>, panel: &mut P) -> Result<(), Error> {
    panel.begin_frame();
    painter::paint(scene, panel)?;
    panel.flush().map_err(|_| Error::Display)
}

/// Clear the glass.
pub fn blank<P: Panel>(panel: &mut P) -> Result<(), Error> {
    panel.begin_frame();
    panel.flush().map_err(|_| Error::Display)
}

/// Draw the screen for the current mode.
pub fn render<P: Panel>(ctx: &Context<'_>, now_ms: u32, panel: &mut P) -> Result<(), Error> {
    present(&layout::compose(ctx, now_ms), panel)
}

/// Fixed-period render schedule.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderTick {
    last_ms: Option<u32>,
}

impl RenderTick {
    pub const fn new() -> Self {
        Self { last_ms: None }
    }

    /// `true` once per period; the first call is always due.
    pub fn due(&mut self, now_ms: u32) -> bool {
        match self.last_ms {
            Some(last) if now_ms.wrapping_sub(last) < RENDER_PERIOD_MS => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityTracker;
    use framebuffer::FrameBuffer;

    #[test]
    fn render_is_one_clear_draw_flush_cycle() {
        let tracker = ActivityTracker::new();
        let ctx = Context::new(&tracker, 0);
        let mut fb = FrameBuffer::new();

        render(&ctx, 100, &mut fb).unwrap();
        assert_eq!(fb.frames(), 1);
        assert_eq!(fb.flushes(), 1);
        assert!(fb.shown_lit_count() > 0);
    }

    #[test]
    fn blank_clears_the_glass() {
        let mut fb = FrameBuffer::new();
        present(&layout::message_scene(layout::STARTING_TEXT), &mut fb).unwrap();
        assert!(fb.shown_lit_count() > 0);
        blank(&mut fb).unwrap();
        assert_eq!(fb.shown_lit_count(), 0);
    }

    #[test]
    fn render_tick_fires_once_per_period() {
        let mut tick = RenderTick::new();
        assert!(tick.due(0));
        assert!(!tick.due(999));
        assert!(tick.due(1_000));
        assert!(!tick.due(1_500));
        assert!(tick.due(2_100));
        assert!(!tick.due(3_099));
        assert!(tick.due(3_100));
    }
}
