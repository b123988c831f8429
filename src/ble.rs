//! GATT surface for the control protocol.
//!
//! One primary service exposes the panel's geometry, cursor, brightness, and
//! color attributes. Characteristic reads and writes are translated into the
//! synchronous [`service`](crate::service) handlers under the shared panel
//! mutex; handler rejections come back as ATT error codes. Advertising
//! parameters, transport setup, and link security stay with the caller.

use trouble_host::prelude::*;

use crate::run::SharedPanel;
use crate::{Error, Result};

/// 128-bit UUID of the matrix control service, for advertising payloads.
pub const SERVICE_UUID: Uuid = uuid!("4fd3af2a-10e8-474f-84d7-722bcfd3efc3");

/// Matrix control service GATT definition.
#[gatt_service(uuid = "4fd3af2a-10e8-474f-84d7-722bcfd3efc3")]
pub struct MatrixGattService {
    /// Matrix width in pixels (u16, little-endian).
    #[characteristic(uuid = "410f7f12-e051-4b5d-a8ed-7d5619727b34", read)]
    pub width: [u8; 2],

    /// Matrix height in pixels (u16, little-endian).
    #[characteristic(uuid = "730134f2-e403-4956-a998-a4649f0fa1bf", read)]
    pub height: [u8; 2],

    /// Pixel cursor (i16, little-endian; -1 selects every pixel).
    #[characteristic(uuid = "85289f22-baa7-447b-acb2-d961c06ecabf", read, write)]
    pub cursor: [u8; 2],

    /// Global brightness (u8).
    #[characteristic(uuid = "a1e0f55c-2d1b-4fca-ae9d-efb3248c202a", read, write)]
    pub brightness: u8,

    /// Color of the pixel under the cursor (RGB, 3 bytes).
    #[characteristic(uuid = "0c903aa6-de65-44c4-9cde-8873267e16c0", read, write)]
    pub color: [u8; 3],
}

/// GATT server carrying the matrix control service.
#[gatt_server]
pub struct MatrixServer {
    /// The one primary service.
    pub matrix: MatrixGattService,
}

/// Map a handler rejection to the ATT error reported to the client.
const fn att_error(error: Error) -> AttErrorCode {
    match error {
        Error::InvalidLength => AttErrorCode::InvalidAttributeValueLength,
        Error::InvalidValue | Error::InvalidIndex => AttErrorCode::ValueNotAllowed,
        Error::UndefinedRead => AttErrorCode::ReadNotPermitted,
        Error::InvalidCharacter | Error::Hardware(_) => AttErrorCode::UnlikelyError,
    }
}

/// Write the fixed geometry mirrors into the attribute table.
///
/// Call once after constructing the server, before advertising.
///
/// # Errors
///
/// Propagates attribute-table failures from the server.
pub fn publish_geometry<const N: usize, const W: usize, const H: usize>(
    server: &MatrixServer<'_>,
    panel: &SharedPanel<N, W, H>,
) -> core::result::Result<(), trouble_host::Error> {
    let (width, height) =
        panel.lock(|cell| (cell.borrow().service().read_width(), cell.borrow().service().read_height()));
    server.set(&server.matrix.width, &width)?;
    server.set(&server.matrix.height, &height)?;
    Ok(())
}

/// Run the GATT event loop for one connection until it disconnects.
///
/// Reads of the color characteristic are computed lazily from the matrix and
/// staged before the read is accepted; writes dispatch into the panel's
/// handlers and are rejected with the mapped ATT error when a handler
/// refuses them.
///
/// # Errors
///
/// Propagates transport failures from the connection.
pub async fn gatt_events_task<const N: usize, const W: usize, const H: usize>(
    server: &MatrixServer<'_>,
    conn: &GattConnection<'_, '_>,
    panel: &SharedPanel<N, W, H>,
) -> core::result::Result<(), trouble_host::Error> {
    let reason = loop {
        match conn.next().await {
            GattConnectionEvent::Disconnected { reason } => break reason,
            GattConnectionEvent::Gatt { event } => {
                let outcome = match &event {
                    GattEvent::Read(read) => handle_read(server, panel, read.handle()),
                    GattEvent::Write(write) => {
                        handle_write(server, panel, write.handle(), write.data())
                    }
                };
                let reply = match outcome {
                    Ok(()) => event.accept(),
                    Err(error) => event.reject(att_error(error)),
                };
                match reply {
                    Ok(reply) => reply.send().await,
                    Err(error) => {
                        defmt::warn!("gatt response failed: {:?}", defmt::Debug2Format(&error));
                    }
                }
            }
            _ => {}
        }
    };
    defmt::info!("gatt client disconnected: {:?}", defmt::Debug2Format(&reason));
    Ok(())
}

fn handle_read<const N: usize, const W: usize, const H: usize>(
    server: &MatrixServer<'_>,
    panel: &SharedPanel<N, W, H>,
    handle: u16,
) -> Result<()> {
    let matrix = &server.matrix;
    if handle == matrix.color.handle {
        let bytes = panel.lock(|cell| cell.borrow().service().read_color())?;
        if let Err(error) = server.set(&matrix.color, &bytes) {
            defmt::warn!("staging color read failed: {:?}", defmt::Debug2Format(&error));
        }
    } else if handle == matrix.cursor.handle {
        let bytes = panel.lock(|cell| cell.borrow().service().read_cursor());
        if let Err(error) = server.set(&matrix.cursor, &bytes) {
            defmt::warn!("staging cursor read failed: {:?}", defmt::Debug2Format(&error));
        }
    } else if handle == matrix.brightness.handle {
        let value = panel.lock(|cell| cell.borrow().service().read_brightness());
        if let Err(error) = server.set(&matrix.brightness, &value) {
            defmt::warn!(
                "staging brightness read failed: {:?}",
                defmt::Debug2Format(&error)
            );
        }
    }
    Ok(())
}

fn handle_write<const N: usize, const W: usize, const H: usize>(
    server: &MatrixServer<'_>,
    panel: &SharedPanel<N, W, H>,
    handle: u16,
    data: &[u8],
) -> Result<()> {
    let matrix = &server.matrix;
    panel.lock(|cell| {
        let mut panel = cell.borrow_mut();
        let service = panel.service_mut();
        if handle == matrix.cursor.handle {
            service.write_cursor(0, data)
        } else if handle == matrix.brightness.handle {
            service.write_brightness(0, data)
        } else if handle == matrix.color.handle {
            service.write_color(0, data)
        } else {
            Ok(())
        }
    })
}
