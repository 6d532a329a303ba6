//! GPIO wake button with async debouncing.
//!
//! One physical button (active-low with internal pull-up). A debounced
//! press restarts the inactivity window, is latched for the main loop as
//! a [`ButtonPressed`](glance::Event::ButtonPressed) event, and ends a
//! suspension in progress via [`WAKE_EDGE`].

use defmt::debug;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use glance::config::BUTTON_DEBOUNCE_MS;
use glance::{ActivityTracker, ButtonLatch};

use crate::now_ms;

/// Raised on every debounced press; the power block waits on it while
/// suspended.
pub static WAKE_EDGE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Run the button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, records the press,
/// then waits for release before repeating.
pub async fn button_task(
    pin: AnyPin,
    tracker: &'static ActivityTracker,
    latch: &'static ButtonLatch,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        btn.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            debug!("Button down");
            latch.press(tracker, now_ms());
            WAKE_EDGE.signal(());

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
