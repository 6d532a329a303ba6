//! GATT server - the phone-facing companion service.
//!
//! Every characteristic is write-only from the phone's point of view;
//! payload layouts are decoded in [`glance::link`].

use defmt::warn;
use glance::link::{self, IconAssembler};
use glance::Event;
use heapless::Vec;

use super::publish;

/// Companion service UUID (`7a1c0000-5e3b-4c7e-9b1a-3f6d2c9e8a10`).
pub const SERVICE_UUID: u128 = 0x7a1c0000_5e3b_4c7e_9b1a_3f6d2c9e8a10;

/// Largest write payload at ATT MTU 247.
pub const MAX_WRITE: usize = 244;

#[nrf_softdevice::gatt_service(uuid = "7a1c0000-5e3b-4c7e-9b1a-3f6d2c9e8a10")]
pub struct CompanionService {
    /// `u32` LE unix seconds + `i32` LE UTC offset.
    #[characteristic(uuid = "7a1c0001-5e3b-4c7e-9b1a-3f6d2c9e8a10", write)]
    pub time: [u8; 8],

    /// `[charging, level]`.
    #[characteristic(uuid = "7a1c0002-5e3b-4c7e-9b1a-3f6d2c9e8a10", write, write_without_response)]
    pub battery: [u8; 2],

    /// `title 0x00 message`.
    #[characteristic(uuid = "7a1c0003-5e3b-4c7e-9b1a-3f6d2c9e8a10", write)]
    pub notification: Vec<u8, MAX_WRITE>,

    /// `[active, direction_len, direction..., distance...]`.
    #[characteristic(uuid = "7a1c0004-5e3b-4c7e-9b1a-3f6d2c9e8a10", write, write_without_response)]
    pub navigation: Vec<u8, MAX_WRITE>,

    /// `[offset_lo, offset_hi, bitmap...]`, in order.
    #[characteristic(uuid = "7a1c0005-5e3b-4c7e-9b1a-3f6d2c9e8a10", write_without_response)]
    pub nav_icon: Vec<u8, MAX_WRITE>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub companion: CompanionService,
}

/// SoftDevice write callback: decode and queue. Never blocks.
pub fn on_write(event: ServerEvent, icons: &mut IconAssembler) {
    let ServerEvent::Companion(event) = event;
    let decoded: Option<Event> = match event {
        CompanionServiceEvent::TimeWrite(data) => link::decode_time(&data),
        CompanionServiceEvent::BatteryWrite(data) => link::decode_battery(&data),
        CompanionServiceEvent::NotificationWrite(data) => link::decode_notification(&data),
        CompanionServiceEvent::NavigationWrite(data) => link::decode_navigation(&data),
        CompanionServiceEvent::NavIconWrite(data) => {
            // Only the final chunk yields an event.
            if let Some(event) = icons.feed_event(&data) {
                publish(event);
            }
            return;
        }
    };

    match decoded {
        Some(event) => publish(event),
        None => warn!("Malformed characteristic write dropped"),
    }
}
