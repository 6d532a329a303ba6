//! The single owned application context.
//!
//! Everything the render tick and the sleep policy read lives here; only
//! the activity timestamp is shared with interrupt context, so it is held
//! by reference to a static [`ActivityTracker`].

use crate::activity::ActivityTracker;
use crate::clock::WallClock;
use crate::config::SLEEP_ENABLED;
use crate::event::Event;
use crate::log::{debug, info};
use crate::mode::{self, DisplayMode};
use crate::state::{BatteryState, ClockState, NavigationState, NotificationState};

pub struct Context<'t> {
    tracker: &'t ActivityTracker,
    pub wall_clock: WallClock,
    pub clock: ClockState,
    pub battery: BatteryState,
    pub notification: NotificationState,
    pub navigation: NavigationState,
    pub sleep_enabled: bool,
}

impl<'t> Context<'t> {
    /// Fresh context; activity is recorded at `now_ms`.
    pub fn new(tracker: &'t ActivityTracker, now_ms: u32) -> Self {
        tracker.record(now_ms);
        let wall_clock = WallClock::new();
        let mut clock = ClockState::default();
        clock.refresh(&wall_clock, now_ms);
        Self {
            tracker,
            wall_clock,
            clock,
            battery: BatteryState::default(),
            notification: NotificationState::default(),
            navigation: NavigationState::default(),
            sleep_enabled: SLEEP_ENABLED,
        }
    }

    pub fn tracker(&self) -> &'t ActivityTracker {
        self.tracker
    }

    pub fn idle_duration(&self, now_ms: u32) -> u32 {
        self.tracker.idle_duration(now_ms)
    }

    /// Apply one inbound event. Every event except an inactive navigation
    /// update counts as activity.
    pub fn dispatch(&mut self, event: &Event, now_ms: u32) {
        debug!("event: {}", event.kind());
        match event {
            Event::ConnectionChanged(connected) => {
                if *connected {
                    info!("Link up");
                } else {
                    info!("Link down");
                }
                self.tracker.record(now_ms);
            }
            Event::NotificationArrived { title, message } => {
                self.notification.arrive(title, message, now_ms);
                self.tracker.record(now_ms);
            }
            Event::TimeSynced {
                unix_secs,
                utc_offset_secs,
            } => {
                self.wall_clock.sync(*unix_secs, *utc_offset_secs, now_ms);
                self.clock.refresh(&self.wall_clock, now_ms);
                self.tracker.record(now_ms);
            }
            Event::BatteryUpdated { level, charging } => {
                self.battery.update(*level, *charging);
                self.tracker.record(now_ms);
            }
            Event::NavDataUpdated {
                active,
                direction,
                distance,
            } => {
                self.navigation.update(*active, direction, distance);
                if *active {
                    self.tracker.record(now_ms);
                }
            }
            Event::NavIconUpdated(icon) => {
                self.navigation.set_icon(icon);
                self.tracker.record(now_ms);
            }
            Event::ButtonPressed => {
                info!("Button pressed - activity reset");
                self.tracker.record(now_ms);
            }
        }
    }

    /// Re-query the wall clock for the clock screen.
    pub fn refresh_clock(&mut self, now_ms: u32) {
        self.wall_clock.advance(now_ms);
        self.clock.refresh(&self.wall_clock, now_ms);
    }

    /// Drop the notification once its window has passed.
    pub fn expire_notification(&mut self, now_ms: u32) -> bool {
        self.notification.expire(now_ms)
    }

    pub fn mode(&self, now_ms: u32) -> DisplayMode {
        mode::select(&self.notification, &self.navigation, now_ms)
    }
}
