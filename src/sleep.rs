//! Sleep policy engine.
//!
//! Decides once per loop iteration whether the device may suspend and runs
//! the suspend sequence: sleep screen, hold, blank, arm wake sources,
//! deep sleep. Resume happens through a reset and is handled by
//! [`power_logic::resume`](crate::power_logic::resume).

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use crate::config::{BUTTON_PIN, SLEEP_SCREEN_HOLD_MS, SLEEP_TIMEOUT_MS, TIMER_WAKE_US};
use crate::context::Context;
use crate::error::{Error, WakeSourceError};
use crate::log::{info, warn};
use crate::power_logic::{Polarity, PowerControl};
use crate::ui::{self, layout, Panel};

/// Outcome of one policy evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepDecision {
    /// Not idle long enough.
    Stay,
    /// A suppressor holds the device awake; the idle window was restarted.
    Hold,
    /// Idle past the timeout with nothing holding the device awake.
    Suspend,
}

/// Charging, a live notification, or active navigation.
pub fn suppressed(ctx: &Context<'_>) -> bool {
    ctx.battery.charging || ctx.notification.active || ctx.navigation.active
}

/// Pure eligibility predicate.
pub fn is_eligible(ctx: &Context<'_>, now_ms: u32) -> bool {
    ctx.sleep_enabled && ctx.idle_duration(now_ms) > SLEEP_TIMEOUT_MS && !suppressed(ctx)
}

/// Evaluate the policy. Suppressors are re-read every call and, while any
/// holds, keep pushing the activity timestamp forward.
pub fn evaluate(ctx: &Context<'_>, now_ms: u32) -> SleepDecision {
    if suppressed(ctx) {
        ctx.tracker().record(now_ms);
        return SleepDecision::Hold;
    }
    if is_eligible(ctx, now_ms) {
        SleepDecision::Suspend
    } else {
        SleepDecision::Stay
    }
}

/// Run the suspend sequence.
///
/// Only returns if a wake source refuses to arm: the sources are
/// disarmed, the idle window restarts at `now_ms`, and the device stays
/// awake.
pub async fn suspend<P, W, D>(
    ctx: &Context<'_>,
    panel: &mut P,
    power: &mut W,
    delay: &mut D,
    now_ms: u32,
) -> Result<Infallible, Error>
where
    P: Panel,
    W: PowerControl,
    D: DelayNs,
{
    info!("Going to deep sleep...");

    if ui::present(&layout::message_scene(layout::SLEEPING_TEXT), panel).is_err() {
        warn!("Sleep screen could not be drawn");
    }
    delay.delay_ms(SLEEP_SCREEN_HOLD_MS).await;
    if ui::blank(panel).is_err() {
        warn!("Panel could not be blanked");
    }

    if let Err(e) = arm_wake_sources(power) {
        power.disarm_wake_sources();
        warn!("Wake source arming failed: {}; staying awake", e);
        ctx.tracker().record(now_ms);
        return Err(e.into());
    }

    Ok(power.enter_deep_sleep().await)
}

fn arm_wake_sources<W: PowerControl>(power: &mut W) -> Result<(), WakeSourceError> {
    power.arm_edge_wake(BUTTON_PIN, Polarity::Low)?;
    power.arm_timer_wake(TIMER_WAKE_US)
}
