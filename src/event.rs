//! Inbound events consumed by the main loop.
//!
//! The BLE link, the button task and the loop itself all feed the same
//! bounded set of variants into [`Context::dispatch`](crate::context::Context::dispatch).

use heapless::String;

use crate::state::NavIcon;

/// Longest notification title carried by an event.
pub const TITLE_CAPACITY: usize = 32;
/// Longest notification body carried by an event.
pub const MESSAGE_CAPACITY: usize = 128;
/// Longest direction text carried by an event.
pub const DIRECTION_CAPACITY: usize = 64;
/// Longest distance text carried by an event.
pub const DISTANCE_CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The phone connected (`true`) or went away (`false`).
    ConnectionChanged(bool),
    /// A phone notification.
    NotificationArrived {
        title: String<TITLE_CAPACITY>,
        message: String<MESSAGE_CAPACITY>,
    },
    /// Phone time sync.
    TimeSynced { unix_secs: u32, utc_offset_secs: i32 },
    /// Phone-reported battery status.
    BatteryUpdated { level: u8, charging: bool },
    /// Navigation metadata (the icon arrives separately).
    NavDataUpdated {
        active: bool,
        direction: String<DIRECTION_CAPACITY>,
        distance: String<DISTANCE_CAPACITY>,
    },
    /// A fully assembled turn icon.
    NavIconUpdated(NavIcon),
    /// Debounced press of the wake button.
    ButtonPressed,
}

impl Event {
    /// Short tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ConnectionChanged(_) => "connection",
            Event::NotificationArrived { .. } => "notification",
            Event::TimeSynced { .. } => "time",
            Event::BatteryUpdated { .. } => "battery",
            Event::NavDataUpdated { .. } => "nav-data",
            Event::NavIconUpdated(_) => "nav-icon",
            Event::ButtonPressed => "button",
        }
    }
}

/// Copy `src` into a bounded string, dropping whole characters that do not fit.
pub fn bounded<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
