//! Power module - nRF52840 implementation of the suspend / wake platform.
//!
//! nRF52840 power modes:
//! - System ON: Normal operation (~3.5 mA with BLE advertising)
//! - System ON Idle: CPU sleeping, RTC + GPIOTE active (~3 µA, radio off)
//! - System OFF: Deep sleep, wake on GPIO only (~0.4 µA)
//!
//! System OFF cannot wake on a timer, so suspension parks in System ON
//! Idle with the radio stopped and the panel blank, waiting for either
//! armed source. Whichever fires, the cause is latched in `GPREGRET` and
//! the chip resets, so the firmware always resumes from a clean boot.

use core::convert::Infallible;

use cortex_m::peripheral::SCB;
use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use glance::config::BUTTON_PIN;
use glance::error::WakeSourceError;
use glance::power_logic::{Polarity, PowerControl, RawWake};
use nrf_softdevice::raw;

use crate::ble::RADIO_OFF;
use crate::ui::buttons::WAKE_EDGE;

/// `GPREGRET` marker: suspension ended on the button.
const CAUSE_BUTTON: u32 = 0xB1;
/// `GPREGRET` marker: suspension ended on the fallback timer.
const CAUSE_TIMER: u32 = 0xB2;

/// Longest fallback timer accepted (one day).
const MAX_TIMER_WAKE_US: u64 = 24 * 60 * 60 * 1_000_000;

/// SoftDevice-backed power control.
///
/// Requires an enabled SoftDevice: the `sd_power_*` calls own the POWER
/// peripheral while it runs.
pub struct NrfPower {
    edge_armed: bool,
    timer: Option<Duration>,
}

impl NrfPower {
    pub const fn new() -> Self {
        Self {
            edge_armed: false,
            timer: None,
        }
    }
}

impl PowerControl for NrfPower {
    fn arm_edge_wake(&mut self, pin: u8, polarity: Polarity) -> Result<(), WakeSourceError> {
        // Only the debounced button task can report an edge.
        if pin != BUTTON_PIN || polarity != Polarity::Low {
            return Err(WakeSourceError::InvalidPin);
        }
        self.edge_armed = true;
        Ok(())
    }

    fn arm_timer_wake(&mut self, duration_us: u64) -> Result<(), WakeSourceError> {
        if duration_us == 0 || duration_us > MAX_TIMER_WAKE_US {
            return Err(WakeSourceError::TimerOutOfRange);
        }
        self.timer = Some(Duration::from_micros(duration_us));
        Ok(())
    }

    fn disarm_wake_sources(&mut self) {
        self.edge_armed = false;
        self.timer = None;
    }

    async fn enter_deep_sleep(&mut self) -> Infallible {
        RADIO_OFF.signal(());
        WAKE_EDGE.reset();

        let cause = match (self.edge_armed, self.timer) {
            (true, Some(after)) => match select(WAKE_EDGE.wait(), Timer::after(after)).await {
                Either::First(()) => CAUSE_BUTTON,
                Either::Second(()) => CAUSE_TIMER,
            },
            (true, None) => {
                WAKE_EDGE.wait().await;
                CAUSE_BUTTON
            }
            (false, Some(after)) => {
                Timer::after(after).await;
                CAUSE_TIMER
            }
            // Nothing armed: the sleep policy never gets here.
            (false, None) => 0,
        };

        // SAFETY: plain SoftDevice SVCs, valid while the SoftDevice is enabled.
        unsafe {
            raw::sd_power_gpregret_clr(0, 0xFF);
            raw::sd_power_gpregret_set(0, cause);
        }
        info!("Waking (cause {=u32:#x}), resetting", cause);
        SCB::sys_reset()
    }

    fn wake_cause(&mut self) -> RawWake {
        let mut reason: u32 = 0;
        let mut marker: u32 = 0;
        // SAFETY: out-pointers are valid locals; the SoftDevice is enabled.
        unsafe {
            raw::sd_power_reset_reason_get(&mut reason);
            raw::sd_power_reset_reason_clr(reason);
            raw::sd_power_gpregret_get(0, &mut marker);
            raw::sd_power_gpregret_clr(0, 0xFF);
        }

        match marker & 0xFF {
            CAUSE_BUTTON => RawWake::PinEdge(BUTTON_PIN),
            CAUSE_TIMER => RawWake::Timer,
            _ if reason == 0 => RawWake::PowerOn,
            _ => RawWake::Reset(reason),
        }
    }
}
