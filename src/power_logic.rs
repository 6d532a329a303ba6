//! Platform power seam and wake-cause classification.
//!
//! The sleep policy only talks to the hardware through [`PowerControl`];
//! the nRF52840 implementation lives in the binary (`power.rs`).

use core::convert::Infallible;

use crate::activity::ActivityTracker;
use crate::error::WakeSourceError;
use crate::log::info;

/// Active level of an edge wake source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Wake when the line is pulled low (active-low button).
    Low,
    High,
}

/// What the platform reports after a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawWake {
    /// An armed edge source on this GPIO fired.
    PinEdge(u8),
    /// The armed timer expired.
    Timer,
    /// Cold boot.
    PowerOn,
    /// Anything else, with the platform's raw reason bits.
    Reset(u32),
}

/// Wake cause, for diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeCause {
    ButtonEdge,
    TimerFallback,
    Other,
}

/// Platform power collaborator.
#[allow(async_fn_in_trait)]
pub trait PowerControl {
    /// Arm an edge-triggered wake on `pin`.
    fn arm_edge_wake(&mut self, pin: u8, polarity: Polarity) -> Result<(), WakeSourceError>;

    /// Arm a fallback wake after `duration_us`.
    fn arm_timer_wake(&mut self, duration_us: u64) -> Result<(), WakeSourceError>;

    /// Undo any arming done so far.
    fn disarm_wake_sources(&mut self);

    /// Suspend. Execution resumes through a reset, never by returning.
    async fn enter_deep_sleep(&mut self) -> Infallible;

    /// Reset cause, queried once after boot.
    fn wake_cause(&mut self) -> RawWake;
}

/// Map the platform's reset report onto a wake cause.
pub fn classify(raw: RawWake, button_pin: u8) -> WakeCause {
    match raw {
        RawWake::PinEdge(pin) if pin == button_pin => WakeCause::ButtonEdge,
        RawWake::Timer => WakeCause::TimerFallback,
        RawWake::PinEdge(_) | RawWake::PowerOn | RawWake::Reset(_) => WakeCause::Other,
    }
}

/// Boot-time resume: classify and log the wake cause, then start a fresh
/// activity window whatever woke us.
pub fn resume<W: PowerControl>(
    power: &mut W,
    tracker: &ActivityTracker,
    button_pin: u8,
    now_ms: u32,
) -> WakeCause {
    let cause = classify(power.wake_cause(), button_pin);
    match cause {
        WakeCause::ButtonEdge => info!("Woke up from button press"),
        WakeCause::TimerFallback => info!("Woke up from timer"),
        WakeCause::Other => info!("Woke up from other source"),
    }
    tracker.record(now_ms);
    cause
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_maps_each_source() {
        assert_eq!(classify(RawWake::PinEdge(11), 11), WakeCause::ButtonEdge);
        assert_eq!(classify(RawWake::PinEdge(3), 11), WakeCause::Other);
        assert_eq!(classify(RawWake::Timer, 11), WakeCause::TimerFallback);
        assert_eq!(classify(RawWake::PowerOn, 11), WakeCause::Other);
        assert_eq!(classify(RawWake::Reset(0x4), 11), WakeCause::Other);
    }
}
