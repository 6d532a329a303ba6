//! Decoding of GATT characteristic writes into [`Event`]s.
//!
//! Each writable characteristic of the companion service carries one
//! small little-endian payload. Malformed writes decode to `None` and are
//! dropped by the caller.

use crate::config::NAV_ICON_BYTES;
use crate::event::{bounded, Event};
use crate::log::warn;
use crate::state::NavIcon;

/// Time sync: `u32` LE unix seconds, `i32` LE UTC offset seconds.
pub fn decode_time(data: &[u8]) -> Option<Event> {
    if data.len() < 8 {
        return None;
    }
    let unix_secs = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let utc_offset_secs = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    Some(Event::TimeSynced {
        unix_secs,
        utc_offset_secs,
    })
}

/// Battery: `[charging, level]`.
pub fn decode_battery(data: &[u8]) -> Option<Event> {
    match data {
        [charging, level, ..] => Some(Event::BatteryUpdated {
            level: (*level).min(100),
            charging: *charging != 0,
        }),
        _ => None,
    }
}

/// Notification: `title 0x00 message`, UTF-8. A write without the
/// separator is all message.
pub fn decode_notification(data: &[u8]) -> Option<Event> {
    let (title, message) = match data.iter().position(|&b| b == 0) {
        Some(split) => (&data[..split], &data[split + 1..]),
        None => (&data[..0], data),
    };
    let title = core::str::from_utf8(title).ok()?;
    let message = core::str::from_utf8(message).ok()?;
    Some(Event::NotificationArrived {
        title: bounded(title),
        message: bounded(message),
    })
}

/// Navigation: `[active, direction_len, direction..., distance...]`.
pub fn decode_navigation(data: &[u8]) -> Option<Event> {
    let (&active, rest) = data.split_first()?;
    let (&dir_len, rest) = rest.split_first()?;
    let dir_len = dir_len as usize;
    if dir_len > rest.len() {
        return None;
    }
    let (direction, distance) = rest.split_at(dir_len);
    let direction = core::str::from_utf8(direction).ok()?;
    let distance = core::str::from_utf8(distance).ok()?;
    Some(Event::NavDataUpdated {
        active: active != 0,
        direction: bounded(direction),
        distance: bounded(distance),
    })
}

/// Reassembles a turn icon from in-order chunks of
/// `[offset_lo, offset_hi, bitmap bytes...]`.
///
/// Offset 0 always starts a new icon. A chunk whose offset does not
/// continue the current icon, or that would overrun it, discards the
/// partial icon.
pub struct IconAssembler {
    buf: [u8; NAV_ICON_BYTES],
    filled: usize,
}

impl IconAssembler {
    pub const fn new() -> Self {
        Self {
            buf: [0; NAV_ICON_BYTES],
            filled: 0,
        }
    }

    /// Bytes received so far for the icon in progress.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Feed one chunk; returns the icon when its last byte arrives.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<NavIcon> {
        let [lo, hi, bytes @ ..] = chunk else {
            return None;
        };
        let offset = u16::from_le_bytes([*lo, *hi]) as usize;
        if offset == 0 {
            self.filled = 0;
        }
        if offset != self.filled || offset + bytes.len() > NAV_ICON_BYTES {
            warn!("Icon chunk at {} dropped (have {})", offset, self.filled);
            self.filled = 0;
            return None;
        }

        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.filled += bytes.len();
        if self.filled == NAV_ICON_BYTES {
            self.filled = 0;
            return Some(NavIcon(self.buf));
        }
        None
    }

    /// Feed one chunk and wrap a completed icon as an event.
    pub fn feed_event(&mut self, chunk: &[u8]) -> Option<Event> {
        self.feed(chunk).map(Event::NavIconUpdated)
    }
}

impl Default for IconAssembler {
    fn default() -> Self {
        Self::new()
    }
}
