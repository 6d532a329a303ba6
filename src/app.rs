//! One iteration of the firmware main loop, host-testable.
//!
//! The embedded binary feeds this with the drained link queue, the button
//! latch, the OLED and the monotonic clock; tests feed it scripted events
//! and a [`FrameBuffer`](crate::ui::framebuffer::FrameBuffer).

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use crate::activity::{ActivityTracker, ButtonLatch};
use crate::config::{BUTTON_PIN, STARTUP_SCREEN_HOLD_MS};
use crate::context::Context;
use crate::error::Error;
use crate::event::Event;
use crate::log::{debug, warn};
use crate::power_logic::{self, PowerControl, WakeCause};
use crate::sleep::{self, SleepDecision};
use crate::ui::{self, layout, Panel, RenderTick};

pub struct App<'t> {
    pub ctx: Context<'t>,
    tick: RenderTick,
}

impl<'t> App<'t> {
    pub fn new(tracker: &'t ActivityTracker, now_ms: u32) -> Self {
        Self {
            ctx: Context::new(tracker, now_ms),
            tick: RenderTick::new(),
        }
    }

    /// Apply pending input, render if the tick is due, expire the
    /// notification, then evaluate the sleep policy.
    ///
    /// Events are applied before the mode is selected, so a screen always
    /// reflects everything received up to `now_ms`.
    pub fn poll<I, P>(
        &mut self,
        events: I,
        button: &ButtonLatch,
        panel: &mut P,
        now_ms: u32,
    ) -> SleepDecision
    where
        I: IntoIterator<Item = Event>,
        P: Panel,
    {
        for event in events {
            self.ctx.dispatch(&event, now_ms);
        }
        if button.take() {
            self.ctx.dispatch(&Event::ButtonPressed, now_ms);
        }

        if self.tick.due(now_ms) {
            self.ctx.refresh_clock(now_ms);
            if ui::render(&self.ctx, now_ms, panel).is_err() {
                warn!("Render failed");
            }
        }

        if self.ctx.expire_notification(now_ms) {
            debug!("Notification expired");
        }

        sleep::evaluate(&self.ctx, now_ms)
    }

    /// Run the suspend sequence; returns only when it was aborted.
    pub async fn suspend<P, W, D>(
        &mut self,
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
        sleep::suspend(&self.ctx, panel, power, delay, now_ms).await
    }
}

/// Boot: classify the wake cause and open the activity window, then hold
/// the splash.
pub async fn boot<W, P, D>(
    power: &mut W,
    tracker: &ActivityTracker,
    panel: &mut P,
    delay: &mut D,
    now_ms: u32,
) -> WakeCause
where
    W: PowerControl,
    P: Panel,
    D: DelayNs,
{
    let cause = power_logic::resume(power, tracker, BUTTON_PIN, now_ms);
    show_startup(panel, delay).await;
    cause
}

/// Boot splash.
pub async fn show_startup<P: Panel, D: DelayNs>(panel: &mut P, delay: &mut D) {
    if ui::present(&layout::message_scene(layout::STARTING_TEXT), panel).is_err() {
        warn!("Startup screen could not be drawn");
    }
    delay.delay_ms(STARTUP_SCREEN_HOLD_MS).await;
}
