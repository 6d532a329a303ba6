//! glance - BLE companion display for nRF52840.
//!
//! Boot sequence:
//! 1. Embassy HAL with interrupt priorities compatible with the SoftDevice.
//! 2. SoftDevice S140 + GATT server, link task advertising as a peripheral.
//! 3. SSD1306 over TWIM0; wake cause classified and activity window
//!    opened before the "Starting..." splash.
//! 4. Main loop: drain link events, render on tick, evaluate sleep.

#![no_std]
#![no_main]

mod ble;
mod power;
mod ui {
    pub mod buttons;
    pub mod display;
}

use core::mem;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_time::{Delay, Instant, Timer};
use glance::config::{BLE_DEVICE_NAME, LOOP_PERIOD_MS};
use glance::{app, ActivityTracker, App, ButtonLatch, SleepDecision};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ble::server::Server;
use power::NrfPower;

/// Shared with the button task; the only state written outside the loop.
static ACTIVITY: ActivityTracker = ActivityTracker::new();
static BUTTON: ButtonLatch = ButtonLatch::new();

static SERVER: StaticCell<Server> = StaticCell::new();

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Monotonic milliseconds since boot, wrapping.
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn link_task(sd: &'static Softdevice, server: &'static Server) {
    ble::link_task(sd, server).await
}

#[embassy_executor::task]
async fn button_task(pin: AnyPin) -> ! {
    ui::buttons::button_task(pin, &ACTIVITY, &BUTTON).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 247 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            // SAFETY: an all-zero security mode is "no write access".
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("glance starting");

    // SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::TWISPI0.set_priority(Priority::P3);

    let sd = Softdevice::enable(&softdevice_config());
    let server = match Server::new(sd) {
        Ok(server) => SERVER.init(server),
        Err(_) => defmt::panic!("{}", glance::error::BleError::GattServer),
    };
    spawner.must_spawn(softdevice_task(sd));
    spawner.must_spawn(link_task(sd, server));
    spawner.must_spawn(button_task(p.P0_11.degrade()));

    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut panel = ui::display::init(i2c);
    let mut delay = Delay;
    let mut power = NrfPower::new();
    app::boot(&mut power, &ACTIVITY, &mut panel, &mut delay, now_ms()).await;

    let mut app = App::new(&ACTIVITY, now_ms());

    loop {
        let now = now_ms();
        let events = core::iter::from_fn(|| ble::EVENTS.try_receive().ok());
        if app.poll(events, &BUTTON, &mut panel, now) == SleepDecision::Suspend {
            if let Err(e) = app.suspend(&mut panel, &mut power, &mut delay, now).await {
                warn!("Suspend aborted: {}", e);
            }
        }
        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}
