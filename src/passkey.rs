//! Pairing-passkey override for the display.
//!
//! While a passkey is being confirmed the override owns the display: it keeps
//! its own matrix with the six digits rendered on it, and the render loop
//! publishes that matrix instead of the control-protocol state until pairing
//! finishes or is cancelled.

use crate::matrix::{Matrix, Rgb};
use crate::segments::SegmentedDisplay;
use crate::Result;

/// Whether a pairing passkey currently owns the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BondingState {
    /// No pairing in progress; the control-protocol state is displayed.
    Idle,
    /// A passkey is on the display and control-protocol state is withheld.
    Bonding,
}

/// Renders a 6-digit pairing passkey and tracks whether it owns the display.
#[derive(Clone, Copy, Debug)]
pub struct PasskeyOverride<const N: usize, const W: usize, const H: usize> {
    state: BondingState,
    display: SegmentedDisplay<W, H>,
    matrix: Matrix<N, W, H>,
}

impl<const N: usize, const W: usize, const H: usize> PasskeyOverride<N, W, H> {
    /// Create an idle override with a blank matrix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: BondingState::Idle,
            display: SegmentedDisplay::new(),
            matrix: Matrix::new(),
        }
    }

    /// Take ownership of the display and render `passkey` as exactly six
    /// decimal digits, most significant first, left-zero-padded, starting at
    /// the top-left cell.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`](crate::Error::InvalidIndex) if six digit cells
    /// do not fit the matrix.
    pub fn show_passkey(&mut self, passkey: u32) -> Result<()> {
        self.state = BondingState::Bonding;
        self.display.clear(&mut self.matrix);

        let mut digits = [0_u8; 6];
        let mut value = passkey;
        for slot in digits.iter_mut().rev() {
            *slot = b'0' + (value % 10) as u8;
            value /= 10;
        }

        for digit in digits {
            self.display.write_char(&mut self.matrix, char::from(digit))?;
        }
        Ok(())
    }

    /// Pairing was cancelled: blank the override matrix and release the
    /// display.
    pub fn cancel(&mut self) {
        self.state = BondingState::Idle;
        self.display.clear(&mut self.matrix);
    }

    /// The link reached its final security level; same release as
    /// [`cancel`](Self::cancel).
    pub fn security_changed(&mut self) {
        self.cancel();
    }

    /// Whether the override currently owns the display.
    #[must_use]
    pub const fn is_bonding(&self) -> bool {
        matches!(self.state, BondingState::Bonding)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BondingState {
        self.state
    }

    /// The override's own matrix, holding the rendered digits.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix<N, W, H> {
        &self.matrix
    }

    /// Set the ink color used for the digits.
    pub const fn set_color(&mut self, color: Rgb) {
        self.display.set_color(color);
    }
}

impl<const N: usize, const W: usize, const H: usize> Default for PasskeyOverride<N, W, H> {
    fn default() -> Self {
        Self::new()
    }
}
