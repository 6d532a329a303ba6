//! Unified error type for glance.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    /// The link -> main loop queue was full and an event was dropped.
    ChannelFull,

    // Power
    /// A wake source could not be armed; the device must not suspend.
    WakeSource(WakeSourceError),

    // UI / Display
    /// I²C transaction to the display failed.
    Display,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Advertising could not start.
    AdvertiseFailed,
    /// The GATT server could not be registered.
    GattServer,
}

/// Why a wake source refused to arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeSourceError {
    /// The pin is not wired to an edge-capable wake input.
    InvalidPin,
    /// The timer cannot represent the requested duration.
    TimerOutOfRange,
    /// Raw platform error code.
    Platform(u32),
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<WakeSourceError> for Error {
    fn from(e: WakeSourceError) -> Self {
        Error::WakeSource(e)
    }
}
