//! In-memory 128×64 panel.
//!
//! Stands in for the SSD1306 on the host: keeps a draw buffer and a copy of
//! what the last flush put "on glass".

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::ui::Panel;

const BYTES: usize = (DISPLAY_WIDTH * DISPLAY_HEIGHT / 8) as usize;

pub struct FrameBuffer {
    buffer: [u8; BYTES],
    glass: [u8; BYTES],
    frames: usize,
    flushes: usize,
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            buffer: [0; BYTES],
            glass: [0; BYTES],
            frames: 0,
            flushes: 0,
        }
    }

    /// Pixel state in the draw buffer.
    pub fn is_on(&self, x: i32, y: i32) -> bool {
        Self::bit(&self.buffer, x, y)
    }

    pub fn lit_count(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_ones()).sum()
    }

    pub fn shown_lit_count(&self) -> u32 {
        self.glass.iter().map(|b| b.count_ones()).sum()
    }

    /// Number of `begin_frame` calls.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of `flush` calls.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..DISPLAY_WIDTH).contains(&x) || !(0..DISPLAY_HEIGHT).contains(&y) {
            return None;
        }
        let i = (y * DISPLAY_WIDTH + x) as usize;
        Some((i / 8, 0x80 >> (i % 8)))
    }

    fn bit(bytes: &[u8; BYTES], x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|(byte, mask)| bytes[byte] & mask != 0)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((byte, mask)) = Self::index(point.x, point.y) {
                match color {
                    BinaryColor::On => self.buffer[byte] |= mask,
                    BinaryColor::Off => self.buffer[byte] &= !mask,
                }
            }
        }
        Ok(())
    }
}

impl Panel for FrameBuffer {
    fn begin_frame(&mut self) {
        self.buffer = [0; BYTES];
        self.frames += 1;
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.glass = self.buffer;
        self.flushes += 1;
        Ok(())
    }
}
