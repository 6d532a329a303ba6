//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertiser** - connectable undirected advertising as
//!    [`BLE_DEVICE_NAME`](glance::config::BLE_DEVICE_NAME) until the phone
//!    connects.
//! 2. **GATT server** - one custom service whose writable characteristics
//!    carry time, battery, notification and navigation updates
//!    (see [`server`]).
//! 3. **Link task** - decodes every write into an [`Event`] and queues it
//!    for the main loop; stops the radio when the device suspends.
//!
//! Communication with the main loop is done via the [`EVENTS`] channel.

pub mod server;

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use glance::config::{BLE_DEVICE_NAME, EVENT_QUEUE_DEPTH};
use glance::error::{BleError, Error};
use glance::Event;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::Softdevice;

use server::Server;

/// Link -> main loop event queue, drained once per loop iteration.
pub static EVENTS: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_DEPTH> = Channel::new();

/// Raised by the power block just before suspension.
pub static RADIO_OFF: Signal<CriticalSectionRawMutex, ()> = Signal::new();

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .full_name(BLE_DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_128(ServiceList::Complete, &[server::SERVICE_UUID.to_le_bytes()])
    .build();

/// Queue an event without blocking the SoftDevice callback.
pub fn publish(event: Event) {
    if let Err(TrySendError::Full(dropped)) = EVENTS.try_send(event) {
        warn!("{}: {} event dropped", Error::ChannelFull, dropped.kind());
    }
}

async fn advertise(sd: &'static Softdevice) -> Result<Connection, Error> {
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    peripheral::advertise_connectable(sd, adv, &peripheral::Config::default())
        .await
        .map_err(|_| BleError::AdvertiseFailed.into())
}

/// Advertise, serve one connection at a time, repeat. Returns once the
/// radio has been switched off for suspension.
pub async fn link_task(sd: &'static Softdevice, server: &'static Server) {
    loop {
        let conn = match select(advertise(sd), RADIO_OFF.wait()).await {
            Either::First(Ok(conn)) => conn,
            Either::First(Err(e)) => {
                warn!("{}", e);
                Timer::after_secs(1).await;
                continue;
            }
            Either::Second(()) => break,
        };

        info!("BLE central connected");
        publish(Event::ConnectionChanged(true));

        let mut icons = glance::link::IconAssembler::new();
        let served = select(
            gatt_server::run(&conn, server, |e| server::on_write(e, &mut icons)),
            RADIO_OFF.wait(),
        )
        .await;

        info!("BLE central disconnected");
        publish(Event::ConnectionChanged(false));

        if let Either::Second(()) = served {
            let _ = conn.disconnect();
            break;
        }
    }
    info!("BLE radio off");
}
