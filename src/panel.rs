//! Top-level state for one remotely controlled panel.
//!
//! A [`Panel`] pairs the control-protocol service with the pairing-passkey
//! override and decides, per commit, which of the two owns the display.

use crate::matrix::{Frame, StripDriver};
use crate::passkey::PasskeyOverride;
use crate::service::MatrixService;
use crate::Result;

/// Control-protocol service plus passkey override for one matrix.
#[derive(Clone, Copy, Debug)]
pub struct Panel<const N: usize, const W: usize, const H: usize> {
    service: MatrixService<N, W, H>,
    passkey: PasskeyOverride<N, W, H>,
}

impl<const N: usize, const W: usize, const H: usize> Panel<N, W, H> {
    /// Create a panel with a blank matrix and no pairing in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            service: MatrixService::new(),
            passkey: PasskeyOverride::new(),
        }
    }

    /// Read access to the control-protocol service.
    #[must_use]
    pub const fn service(&self) -> &MatrixService<N, W, H> {
        &self.service
    }

    /// Mutable access to the control-protocol service, for attribute
    /// handlers.
    pub const fn service_mut(&mut self) -> &mut MatrixService<N, W, H> {
        &mut self.service
    }

    /// Render a pairing passkey; the override owns the display until
    /// [`cancel_pairing`](Self::cancel_pairing) or
    /// [`security_changed`](Self::security_changed).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`](crate::Error::InvalidIndex) if six digit cells
    /// do not fit the matrix.
    pub fn show_passkey(&mut self, passkey: u32) -> Result<()> {
        self.passkey.show_passkey(passkey)
    }

    /// Pairing was cancelled: blank the display and hand it back to the
    /// control protocol.
    ///
    /// The service matrix is cleared too, so the next commit shows black
    /// rather than whatever pixel state accumulated before or during
    /// pairing.
    pub fn cancel_pairing(&mut self) {
        self.passkey.cancel();
        self.service.matrix_mut().clear();
    }

    /// The link reached its final security level; same release as
    /// [`cancel_pairing`](Self::cancel_pairing).
    pub fn security_changed(&mut self) {
        self.cancel_pairing();
    }

    /// Whether the passkey override currently owns the display.
    #[must_use]
    pub const fn is_bonding(&self) -> bool {
        self.passkey.is_bonding()
    }

    /// The frame the next commit will publish, and the brightness to scale
    /// it by.
    #[must_use]
    pub fn frame_snapshot(&self) -> (Frame<N>, u8) {
        let frame = if self.passkey.is_bonding() {
            *self.passkey.matrix().frame()
        } else {
            *self.service.matrix().frame()
        };
        (frame, self.service.read_brightness())
    }

    /// Commit whichever frame currently owns the display.
    ///
    /// # Errors
    ///
    /// Propagates the driver's [`Error::Hardware`](crate::Error::Hardware)
    /// outcome unchanged.
    pub async fn commit<D: StripDriver<N>>(&self, driver: &mut D) -> Result<()> {
        let (frame, brightness) = self.frame_snapshot();
        driver.update(&frame.scaled(brightness).0).await
    }
}

impl<const N: usize, const W: usize, const H: usize> Default for Panel<N, W, H> {
    fn default() -> Self {
        Self::new()
    }
}
