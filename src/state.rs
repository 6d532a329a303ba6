//! Plain data holders updated by inbound events.

use heapless::String;

use crate::clock::WallClock;
use crate::config::{
    NAV_ICON_BYTES, NAV_ICON_SIZE, NOTIFICATION_ELLIPSIS, NOTIFICATION_MAX_CHARS,
    NOTIFICATION_WINDOW_MS,
};
use crate::event::bounded;

/// Longest stored notification line: 20 chars of up to 4 UTF-8 bytes + "...".
pub const NOTIFICATION_TEXT_CAPACITY: usize = 96;

/// Formatted time and date shown on the clock screen.
#[derive(Clone, Debug, Default)]
pub struct ClockState {
    pub time_text: String<8>,
    pub date_text: String<8>,
}

impl ClockState {
    /// Re-query the wall clock.
    pub fn refresh(&mut self, clock: &WallClock, now_ms: u32) {
        self.time_text.clear();
        self.date_text.clear();
        match clock.local_time(now_ms) {
            Some(t) => {
                self.time_text = t.time_text();
                self.date_text = t.date_text();
            }
            None => {
                let _ = self.time_text.push_str("--:--");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    level: u8,
    pub charging: bool,
}

impl BatteryState {
    pub fn update(&mut self, level: u8, charging: bool) {
        self.level = level.min(100);
        self.charging = charging;
    }

    /// Charge percentage, always within 0..=100.
    pub fn level(&self) -> u8 {
        self.level
    }
}

#[derive(Clone, Debug, Default)]
pub struct NotificationState {
    pub active: bool,
    pub text: String<NOTIFICATION_TEXT_CAPACITY>,
    pub start_ms: u32,
}

impl NotificationState {
    /// Activate a notification; a new arrival restarts the display window.
    pub fn arrive(&mut self, title: &str, message: &str, now_ms: u32) {
        self.text = notification_line(title, message);
        self.start_ms = now_ms;
        self.active = true;
    }

    /// Milliseconds since the notification arrived.
    pub fn age(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    /// `true` while the notification owns the screen.
    pub fn in_window(&self, now_ms: u32) -> bool {
        self.active && self.age(now_ms) < NOTIFICATION_WINDOW_MS
    }

    /// Clear `active` once the window has passed.
    ///
    /// Returns `true` only on the call that performs the expiry.
    pub fn expire(&mut self, now_ms: u32) -> bool {
        if self.active && self.age(now_ms) > NOTIFICATION_WINDOW_MS {
            self.active = false;
            return true;
        }
        false
    }
}

/// Join `title: message` and cut it to the visible character budget.
pub fn notification_line(title: &str, message: &str) -> String<NOTIFICATION_TEXT_CAPACITY> {
    let joined = title.chars().chain(": ".chars()).chain(message.chars());
    let total = title.chars().count() + 2 + message.chars().count();

    let mut line = String::new();
    for c in joined.take(NOTIFICATION_MAX_CHARS) {
        if line.push(c).is_err() {
            break;
        }
    }
    if total > NOTIFICATION_MAX_CHARS {
        let _ = line.push_str(NOTIFICATION_ELLIPSIS);
    }
    line
}

/// 48×48 monochrome turn icon, row-major, MSB-first within each byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavIcon(pub [u8; NAV_ICON_BYTES]);

impl NavIcon {
    pub const fn blank() -> Self {
        Self([0; NAV_ICON_BYTES])
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        if x >= NAV_ICON_SIZE || y >= NAV_ICON_SIZE {
            return false;
        }
        let index = y * NAV_ICON_SIZE + x;
        self.0[index / 8] & (0x80 >> (index % 8)) != 0
    }
}

impl Default for NavIcon {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Clone, Debug, Default)]
pub struct NavigationState {
    pub active: bool,
    pub has_icon: bool,
    pub icon: NavIcon,
    pub direction: String<64>,
    pub distance: String<16>,
}

impl NavigationState {
    /// Apply a metadata update. The icon is left untouched.
    pub fn update(&mut self, active: bool, direction: &str, distance: &str) {
        self.active = active;
        self.direction = bounded(direction);
        self.distance = bounded(distance);
    }

    /// Install a fully received icon.
    pub fn set_icon(&mut self, icon: &NavIcon) {
        self.icon = *icon;
        self.has_icon = true;
    }
}
