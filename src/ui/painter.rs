//! Executes drawing plans on a panel.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use u8g2_fonts::types::{FontColor, VerticalPosition};

use crate::config::NAV_ICON_SIZE;
use crate::error::Error;
use crate::state::NavIcon;
use crate::ui::layout::{DrawOp, Scene};

/// Draw every op of `scene` in order. Does not clear or flush.
pub fn paint<D>(scene: &Scene<'_>, target: &mut D) -> Result<(), Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for op in scene.ops() {
        match op {
            DrawOp::Text { origin, font, text } => {
                font.renderer()
                    .render(
                        text.as_str(),
                        *origin,
                        VerticalPosition::Baseline,
                        FontColor::Transparent(BinaryColor::On),
                        target,
                    )
                    .map_err(|_| Error::Display)?;
            }
            DrawOp::Frame(rect) => {
                rect.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(target)
                    .map_err(|_| Error::Display)?;
            }
            DrawOp::Fill(rect) => {
                rect.into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(target)
                    .map_err(|_| Error::Display)?;
            }
            DrawOp::Icon { origin, icon } => {
                draw_icon(icon, *origin, target)?;
            }
        }
    }
    Ok(())
}

/// Plot the set bits of a turn icon, clipped to the target.
fn draw_icon<D>(icon: &NavIcon, origin: Point, target: &mut D) -> Result<(), Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let bounds: Rectangle = target.bounding_box();
    let pixels = (0..NAV_ICON_SIZE)
        .flat_map(|y| (0..NAV_ICON_SIZE).map(move |x| (x, y)))
        .filter(|&(x, y)| icon.is_set(x, y))
        .map(|(x, y)| origin + Point::new(x as i32, y as i32))
        .filter(|p| bounds.contains(*p))
        .map(|p| Pixel(p, BinaryColor::On));

    target.draw_iter(pixels).map_err(|_| Error::Display)
}
