//! glance: companion display firmware core.
//!
//! Everything that decides *what* the device does lives in this library and
//! runs on the host: event dispatch, display-mode selection, screen layout,
//! and the activity-based sleep policy. The embedded binary (`main.rs`) only
//! wires these to the SoftDevice, the OLED, the button and the power block.
//!
//! Usage: `cargo test --lib` / `cargo test --tests`
//!
//! Note: The embedded binary is built with `--features embedded` for
//! `thumbv7em-none-eabihf`; the library itself never touches hardware.

#![cfg_attr(not(test), no_std)]

pub mod activity;
pub mod app;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod link;
pub mod mode;
pub mod power_logic;
pub mod sleep;
pub mod state;
pub mod ui;

mod log;

pub use activity::{ActivityTracker, ButtonLatch};
pub use app::App;
pub use context::Context;
pub use error::Error;
pub use event::Event;
pub use mode::DisplayMode;
pub use sleep::SleepDecision;
