//! End-to-end scenarios for the glance coordination core.

use core::convert::Infallible;

use glance::config::{BUTTON_PIN, SLEEP_TIMEOUT_MS};
use glance::error::WakeSourceError;
use glance::event::bounded;
use glance::power_logic::{resume, Polarity, PowerControl, RawWake, WakeCause};
use glance::sleep::{evaluate, is_eligible};
use glance::ui::framebuffer::FrameBuffer;
use glance::ui::layout::{compose, countdown_seconds};
use glance::{ActivityTracker, App, ButtonLatch, DisplayMode, Event, SleepDecision};

struct BootedBy(RawWake);

impl PowerControl for BootedBy {
    fn arm_edge_wake(&mut self, _pin: u8, _polarity: Polarity) -> Result<(), WakeSourceError> {
        Ok(())
    }

    fn arm_timer_wake(&mut self, _duration_us: u64) -> Result<(), WakeSourceError> {
        Ok(())
    }

    fn disarm_wake_sources(&mut self) {}

    async fn enter_deep_sleep(&mut self) -> Infallible {
        core::future::pending().await
    }

    fn wake_cause(&mut self) -> RawWake {
        self.0
    }
}

fn note(title: &str, message: &str) -> Event {
    Event::NotificationArrived {
        title: bounded(title),
        message: bounded(message),
    }
}

#[test]
fn long_notification_is_cut_and_owns_the_screen_for_its_window() {
    let tracker = ActivityTracker::new();
    let button = ButtonLatch::new();
    let mut app = App::new(&tracker, 0);
    let mut fb = FrameBuffer::new();

    // "Ann: " + 20 = 25 characters.
    app.poll([note("Ann", "abcdefghijklmnopqrst")], &button, &mut fb, 0);
    assert_eq!(app.ctx.notification.text.as_str(), "Ann: abcdefghijklmno...");

    for now in [0, 700, 1_499] {
        assert_eq!(app.ctx.mode(now), DisplayMode::Notification, "t={now}");
    }
    assert_eq!(app.ctx.mode(1_500), DisplayMode::Clock);
}

#[test]
fn notification_preempts_active_navigation() {
    let tracker = ActivityTracker::new();
    let button = ButtonLatch::new();
    let mut app = App::new(&tracker, 0);
    let mut fb = FrameBuffer::new();

    let nav = Event::NavDataUpdated {
        active: true,
        direction: bounded("Turn right onto Main St"),
        distance: bounded("150 m"),
    };
    app.poll([nav], &button, &mut fb, 0);
    assert_eq!(app.ctx.mode(10), DisplayMode::Navigation);

    app.poll([note("Bo", "hey")], &button, &mut fb, 100);
    assert_eq!(app.ctx.mode(100), DisplayMode::Notification);

    // Once expired, navigation comes back.
    app.poll(core::iter::empty(), &button, &mut fb, 1_700);
    assert_eq!(app.ctx.mode(1_700), DisplayMode::Navigation);
}

#[test]
fn idle_countdown_then_eligible_just_after_timeout() {
    let tracker = ActivityTracker::new();
    let app = App::new(&tracker, 0);
    let ctx = &app.ctx;

    assert_eq!(countdown_seconds(ctx, 19_999), None);
    assert_eq!(countdown_seconds(ctx, 20_000), Some(10));
    assert_eq!(countdown_seconds(ctx, 20_001), Some(10));
    assert_eq!(countdown_seconds(ctx, 29_000), Some(1));
    assert_eq!(countdown_seconds(ctx, 29_999), Some(1));

    let scene = compose(ctx, 25_500);
    assert!(scene.texts().as_slice().contains(&"Sleep in 5s"));

    assert!(!is_eligible(ctx, SLEEP_TIMEOUT_MS));
    assert!(is_eligible(ctx, 30_001));
    assert_eq!(evaluate(ctx, 30_001), SleepDecision::Suspend);
}

#[test]
fn charging_update_past_threshold_blocks_sleep_and_restarts_window() {
    let tracker = ActivityTracker::new();
    let button = ButtonLatch::new();
    let mut app = App::new(&tracker, 0);
    let mut fb = FrameBuffer::new();

    assert!(is_eligible(&app.ctx, 45_000));

    let charging = Event::BatteryUpdated {
        level: 60,
        charging: true,
    };
    let decision = app.poll([charging], &button, &mut fb, 45_000);
    assert_eq!(decision, SleepDecision::Hold);
    assert!(!is_eligible(&app.ctx, 45_000));
    assert_eq!(tracker.last_activity(), 45_000);
    assert_eq!(countdown_seconds(&app.ctx, 70_000), None);
}

#[test]
fn button_wake_resumes_fresh() {
    let tracker = ActivityTracker::new();
    tracker.record(5);

    let mut power = BootedBy(RawWake::PinEdge(BUTTON_PIN));
    let cause = resume(&mut power, &tracker, BUTTON_PIN, 1_234);

    assert_eq!(cause, WakeCause::ButtonEdge);
    assert_eq!(tracker.last_activity(), 1_234);
    assert_eq!(tracker.idle_duration(1_234), 0);
}

#[test]
fn any_wake_source_resumes_fresh() {
    for (raw, expected) in [
        (RawWake::Timer, WakeCause::TimerFallback),
        (RawWake::PowerOn, WakeCause::Other),
        (RawWake::Reset(0x1), WakeCause::Other),
    ] {
        let tracker = ActivityTracker::new();
        let mut power = BootedBy(raw);
        assert_eq!(resume(&mut power, &tracker, BUTTON_PIN, 77), expected);
        assert_eq!(tracker.last_activity(), 77);
    }
}

#[test]
fn eligibility_stays_true_until_activity() {
    let tracker = ActivityTracker::new();
    let button = ButtonLatch::new();
    let mut app = App::new(&tracker, 0);
    let mut fb = FrameBuffer::new();

    let mut became_eligible = None;
    for now in (0..60_000).step_by(10) {
        let eligible = is_eligible(&app.ctx, now);
        if let Some(at) = became_eligible {
            assert!(eligible, "dropped at {now} after becoming eligible at {at}");
        } else if eligible {
            became_eligible = Some(now);
        }
    }
    assert_eq!(became_eligible, Some(30_010));

    // A button press is the only thing that resets it.
    button.press(&tracker, 60_000);
    app.poll(core::iter::empty(), &button, &mut fb, 60_000);
    assert!(!is_eligible(&app.ctx, 60_010));
}

#[test]
fn expiry_check_is_idempotent() {
    let tracker = ActivityTracker::new();
    let button = ButtonLatch::new();
    let mut app = App::new(&tracker, 0);
    let mut fb = FrameBuffer::new();

    app.poll([note("a", "b")], &button, &mut fb, 0);
    assert!(app.ctx.expire_notification(1_501));
    assert!(!app.ctx.expire_notification(1_502));
    assert!(!app.ctx.expire_notification(5_000));
    assert!(!app.ctx.notification.active);
}
