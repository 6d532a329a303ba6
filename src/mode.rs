//! Display mode selection.
//!
//! Priority is fixed: a fresh notification preempts navigation, which
//! preempts the clock.

use crate::state::{NavigationState, NotificationState};

/// The single screen shown during a render tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Notification,
    Navigation,
    Clock,
}

/// Pick the screen for this tick.
///
/// Reads only `notification.active`, `notification.start_ms` and
/// `navigation.active`.
pub fn select(
    notification: &NotificationState,
    navigation: &NavigationState,
    now_ms: u32,
) -> DisplayMode {
    if notification.in_window(now_ms) {
        DisplayMode::Notification
    } else if navigation.active {
        DisplayMode::Navigation
    } else {
        DisplayMode::Clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NOTIFICATION_WINDOW_MS;

    fn notification(active: bool, start_ms: u32) -> NotificationState {
        NotificationState {
            active,
            start_ms,
            ..Default::default()
        }
    }

    fn navigation(active: bool) -> NavigationState {
        NavigationState {
            active,
            ..Default::default()
        }
    }

    #[test]
    fn clock_when_nothing_is_active() {
        assert_eq!(
            select(&notification(false, 0), &navigation(false), 10_000),
            DisplayMode::Clock
        );
    }

    #[test]
    fn navigation_beats_clock() {
        assert_eq!(
            select(&notification(false, 0), &navigation(true), 10_000),
            DisplayMode::Navigation
        );
    }

    #[test]
    fn fresh_notification_beats_everything() {
        for nav_active in [false, true] {
            for age in [0, 1, 750, NOTIFICATION_WINDOW_MS - 1] {
                assert_eq!(
                    select(&notification(true, 5_000), &navigation(nav_active), 5_000 + age),
                    DisplayMode::Notification
                );
            }
        }
    }

    #[test]
    fn stale_notification_falls_through() {
        let n = notification(true, 5_000);
        let at_edge = 5_000 + NOTIFICATION_WINDOW_MS;
        assert_eq!(select(&n, &navigation(false), at_edge), DisplayMode::Clock);
        assert_eq!(select(&n, &navigation(true), at_edge), DisplayMode::Navigation);
    }

    #[test]
    fn depends_only_on_selector_fields() {
        // Fields outside the selector inputs must not change the outcome.
        let mut n = notification(true, 100);
        let mut nav = navigation(false);
        let before = select(&n, &nav, 600);

        n.text.clear();
        let _ = n.text.push_str("something else entirely");
        nav.has_icon = true;
        let _ = nav.direction.push_str("Turn right");
        let _ = nav.distance.push_str("1.2 km");
        assert_eq!(select(&n, &nav, 600), before);
    }
}
