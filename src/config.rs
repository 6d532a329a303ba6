//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Sleep policy

/// Master switch for activity-based deep sleep.
pub const SLEEP_ENABLED: bool = true;

/// Inactivity timeout before the device suspends (ms).
pub const SLEEP_TIMEOUT_MS: u32 = 30_000;

/// The clock screen shows a "Sleep in Ns" countdown during this final
/// stretch of the inactivity timeout (ms).
pub const COUNTDOWN_WINDOW_MS: u32 = 10_000;

/// How long the "Sleeping..." screen stays up before the panel is blanked (ms).
pub const SLEEP_SCREEN_HOLD_MS: u32 = 1_000;

/// Timer fallback wake source armed next to the button (µs). 60 s.
pub const TIMER_WAKE_US: u64 = 60_000_000;

// Display

/// Period of the render tick (ms).
pub const RENDER_PERIOD_MS: u32 = 1_000;

/// Main loop pacing (ms).
pub const LOOP_PERIOD_MS: u64 = 10;

/// How long the "Starting..." splash stays up after boot or wake (ms).
pub const STARTUP_SCREEN_HOLD_MS: u32 = 1_000;

/// Panel geometry (SSD1306 128×64).
pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 64;

// Notifications

/// A notification owns the screen for this long after it arrives (ms).
pub const NOTIFICATION_WINDOW_MS: u32 = 1_500;

/// Visible characters of a notification before it is cut.
pub const NOTIFICATION_MAX_CHARS: usize = 20;

/// Marker appended to a cut notification.
pub const NOTIFICATION_ELLIPSIS: &str = "...";

// Navigation

/// Turn icon edge length (pixels). Icons are square, 1 bit per pixel.
pub const NAV_ICON_SIZE: usize = 48;

/// Bytes in one packed turn icon.
pub const NAV_ICON_BYTES: usize = NAV_ICON_SIZE * NAV_ICON_SIZE / 8;

// BLE

/// Advertised device name.
pub const BLE_DEVICE_NAME: &str = "glance";

/// Depth of the link → main loop event queue.
pub const EVENT_QUEUE_DEPTH: usize = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button (wake)  → P0.11  (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// GPIO number of the wake button (port 0).
pub const BUTTON_PIN: u8 = 11;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;
