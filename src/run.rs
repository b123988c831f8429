//! Fixed-cadence render loop tying the shared panel to the strip driver.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Timer};

use crate::matrix::StripDriver;
use crate::panel::Panel;

/// Time between frame commits.
pub const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// A [`Panel`] shared between attribute handlers and the render loop.
pub type SharedPanel<const N: usize, const W: usize, const H: usize> =
    Mutex<CriticalSectionRawMutex, RefCell<Panel<N, W, H>>>;

/// Create a shared panel suitable for static allocation.
#[must_use]
pub const fn shared_panel<const N: usize, const W: usize, const H: usize>() -> SharedPanel<N, W, H>
{
    Mutex::new(RefCell::new(Panel::new()))
}

/// Commit the shared panel to the strip every [`RENDER_INTERVAL`].
///
/// Attribute handlers mutate the panel under the mutex and return
/// immediately; their changes reach the LEDs on the next tick here. Nothing
/// is awaited while the mutex is held. A hardware failure is logged and that
/// tick's frame dropped; the loop never retries in place and never exits.
pub async fn render_loop<const N: usize, const W: usize, const H: usize, D: StripDriver<N>>(
    panel: &SharedPanel<N, W, H>,
    driver: &mut D,
) -> ! {
    defmt::info!("render loop started, interval {} ms", RENDER_INTERVAL.as_millis());
    loop {
        let (frame, brightness) = panel.lock(|cell| cell.borrow().frame_snapshot());
        if let Err(error) = driver.update(&frame.scaled(brightness).0).await {
            defmt::warn!("strip update failed: {}", defmt::Debug2Format(&error));
        }
        Timer::after(RENDER_INTERVAL).await;
    }
}
