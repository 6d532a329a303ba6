//! SSD1306 OLED display wrapper.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use glance::ui::Panel;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// The OLED as a [`Panel`].
pub struct Oled<I2C>(Display<I2C>);

/// Initialise the SSD1306 display and clear the screen.
///
/// A panel that fails to initialise is still returned; every later
/// flush reports the failure and the loop keeps running without it.
pub fn init<I2C>(i2c: I2C) -> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        defmt::warn!("SSD1306 init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    Oled(display)
}

impl<I2C> OriginDimensions for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn size(&self) -> Size {
        self.0.size()
    }
}

impl<I2C> DrawTarget for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    type Color = BinaryColor;
    type Error = <Display<I2C> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }
}

impl<I2C> Panel for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn begin_frame(&mut self) {
        self.0.clear_buffer();
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}
