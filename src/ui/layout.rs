//! Screen layouts as drawing plans.
//!
//! Each screen is composed into a [`Scene`]: an ordered list of abstract
//! draw calls. Nothing here touches pixels; [`painter`](super::painter)
//! executes the plan on a panel.
//!
//! Coordinates follow the u8g2 convention: text origins are baselines.

use core::fmt::Write;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use crate::config::{
    COUNTDOWN_WINDOW_MS, DISPLAY_WIDTH, SLEEP_TIMEOUT_MS,
};
use crate::context::Context;
use crate::mode::DisplayMode;
use crate::sleep;
use crate::state::{BatteryState, ClockState, NavIcon, NavigationState, NotificationState};
use crate::ui::fonts::Font;

/// Longest single text run in a plan.
pub const TEXT_CAPACITY: usize = 96;

/// Upper bound on draw calls per screen.
pub const MAX_OPS: usize = 12;

pub const NOTIFICATION_LABEL: &str = "Notification:";
pub const SLEEPING_TEXT: &str = "Sleeping...";
pub const STARTING_TEXT: &str = "Starting...";

/// Top-left of the turn icon.
pub const NAV_ICON_ORIGIN: Point = Point::new(0, 16);
/// Left edge of direction text when an icon is shown.
const NAV_TEXT_X_WITH_ICON: i32 = 52;
const NAV_TEXT_TOP: i32 = 10;

/// Top-left of the battery gauge on the clock screen.
pub const BATTERY_ORIGIN: Point = Point::new(100, 52);
const BATTERY_BODY: Size = Size::new(20, 8);
/// Fill bar width at 100 %.
pub const BATTERY_FILL_WIDTH: u32 = 18;

/// One abstract draw call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp<'a> {
    /// Text with its baseline-left corner at `origin`.
    Text {
        origin: Point,
        font: Font,
        text: String<TEXT_CAPACITY>,
    },
    /// 1 px outline.
    Frame(Rectangle),
    /// Solid box.
    Fill(Rectangle),
    /// 48×48 bitmap with its top-left corner at `origin`.
    Icon { origin: Point, icon: &'a NavIcon },
}

/// Drawing plan for one full frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scene<'a> {
    ops: Vec<DrawOp<'a>, MAX_OPS>,
}

impl<'a> Scene<'a> {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp<'a>] {
        &self.ops
    }

    pub fn text(&mut self, x: i32, y: i32, font: Font, text: &str) {
        let mut run = String::new();
        for c in text.chars() {
            if run.push(c).is_err() {
                break;
            }
        }
        self.push(DrawOp::Text {
            origin: Point::new(x, y),
            font,
            text: run,
        });
    }

    pub fn frame(&mut self, rect: Rectangle) {
        self.push(DrawOp::Frame(rect));
    }

    pub fn fill(&mut self, rect: Rectangle) {
        if rect.size.width > 0 && rect.size.height > 0 {
            self.push(DrawOp::Fill(rect));
        }
    }

    pub fn icon(&mut self, origin: Point, icon: &'a NavIcon) {
        self.push(DrawOp::Icon { origin, icon });
    }

    /// Every text run, in draw order.
    pub fn texts(&self) -> Vec<&str, MAX_OPS> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, op: DrawOp<'a>) {
        // MAX_OPS covers the busiest screen.
        let _ = self.ops.push(op);
    }
}

/// Plan the screen for the current mode.
pub fn compose<'a>(ctx: &'a Context<'_>, now_ms: u32) -> Scene<'a> {
    match ctx.mode(now_ms) {
        DisplayMode::Notification => notification_scene(&ctx.notification),
        DisplayMode::Navigation => navigation_scene(&ctx.navigation),
        DisplayMode::Clock => clock_scene(&ctx.clock, &ctx.battery, countdown_seconds(ctx, now_ms)),
    }
}

/// Label line, then the (already truncated) message line.
pub fn notification_scene(notification: &NotificationState) -> Scene<'static> {
    let mut scene = Scene::new();
    scene.text(0, 12, Font::Small, NOTIFICATION_LABEL);
    scene.text(0, 28, Font::Small, &notification.text);
    scene
}

pub fn navigation_scene(nav: &NavigationState) -> Scene<'_> {
    let mut scene = Scene::new();

    let text_x = if nav.has_icon {
        scene.icon(NAV_ICON_ORIGIN, &nav.icon);
        NAV_TEXT_X_WITH_ICON
    } else {
        0
    };
    let available = (DISPLAY_WIDTH - text_x) as u32;
    let y = NAV_TEXT_TOP;

    match wrap_direction(&nav.direction, available) {
        DirectionLines::Two(first, second) => {
            scene.text(text_x, y + 8, Font::Bold, first);
            scene.text(text_x, y + 20, Font::Bold, second);
        }
        DirectionLines::One(line) => {
            scene.text(text_x, y + 12, Font::Bold, line);
        }
    }
    scene.text(text_x, y + 40, Font::Large, &nav.distance);
    scene
}

pub fn clock_scene(
    clock: &ClockState,
    battery: &BatteryState,
    countdown: Option<u32>,
) -> Scene<'static> {
    let mut scene = Scene::new();
    scene.text(0, 42, Font::Huge, &clock.time_text);
    scene.text(90, 10, Font::Small, &clock.date_text);
    battery_gauge(&mut scene, BATTERY_ORIGIN, battery.level());

    if let Some(secs) = countdown {
        let mut msg: String<16> = String::new();
        let _ = write!(msg, "Sleep in {}s", secs);
        scene.text(0, 64, Font::Small, &msg);
    }
    scene
}

/// Centered one-liner used by the splash and the sleep screen.
pub fn message_scene(text: &str) -> Scene<'static> {
    let mut scene = Scene::new();
    scene.text(30, 32, Font::Small, text);
    scene
}

/// Outer frame, terminal nub, and a fill bar proportional to `level`.
pub fn battery_gauge(scene: &mut Scene<'_>, origin: Point, level: u8) {
    scene.frame(Rectangle::new(origin, BATTERY_BODY));
    scene.fill(Rectangle::new(
        origin + Point::new(BATTERY_BODY.width as i32, 2),
        Size::new(2, 4),
    ));
    scene.fill(Rectangle::new(
        origin + Point::new(1, 1),
        Size::new(battery_fill_width(level), 6),
    ));
}

/// Fill bar width in pixels, floor-rounded.
pub fn battery_fill_width(level: u8) -> u32 {
    u32::from(level.min(100)) * BATTERY_FILL_WIDTH / 100
}

/// Whole seconds left before sleep, rounded up, while inside the final
/// countdown window and nothing holds the device awake.
pub fn countdown_seconds(ctx: &Context<'_>, now_ms: u32) -> Option<u32> {
    if !ctx.sleep_enabled || sleep::suppressed(ctx) {
        return None;
    }
    let idle = ctx.idle_duration(now_ms);
    if idle >= SLEEP_TIMEOUT_MS {
        return None;
    }
    let remaining = SLEEP_TIMEOUT_MS - idle;
    (remaining <= COUNTDOWN_WINDOW_MS).then(|| remaining.div_ceil(1000))
}

/// Direction text split for the navigation screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionLines<'a> {
    One(&'a str),
    Two(&'a str, &'a str),
}

/// Wrap `text` onto two lines only when it is wider than `available`.
///
/// The break goes at the space nearest the middle of the text (the earlier
/// one on a tie). Without a space the text stays on one line and clips.
pub fn wrap_direction(text: &str, available: u32) -> DirectionLines<'_> {
    if Font::Bold.text_width(text) <= available {
        return DirectionLines::One(text);
    }
    let mid = text.len() / 2;
    let split = text
        .char_indices()
        .filter(|&(_, c)| c == ' ')
        .map(|(i, _)| i)
        .min_by_key(|&i| i.abs_diff(mid));

    match split {
        Some(i) => DirectionLines::Two(&text[..i], &text[i + 1..]),
        None => DirectionLines::One(text),
    }
}
