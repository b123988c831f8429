//! Pixel buffer and bounds-checked matrix view over a serpentine-wired strip.
//!
//! A [`Matrix`] owns one [`Frame`] of pixels in physical wiring order and
//! exposes `(row, col)` and chain-index accessors that validate their input
//! before touching the buffer. Nothing reaches the LEDs until
//! [`Matrix::commit`] hands a brightness-scaled copy of the frame to a
//! [`StripDriver`].
//!
//! # Example
//!
//! ```rust
//! use matrix_envoy::matrix::{Matrix, colors};
//!
//! let mut matrix = Matrix::<256, 16, 16>::new();
//! matrix.set_pixel(1, 0, colors::RED)?;
//! assert_eq!(matrix.pixel_at(16)?, colors::RED);
//! # Ok::<(), matrix_envoy::Error>(())
//! ```

use core::convert::Infallible;
use core::ops::{Deref, DerefMut};

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use smart_leds::RGB8;

use crate::layout::SerpentineLayout;
use crate::{Error, Result};

pub use smart_leds::colors;

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

/// Convert a color to [`Rgb`] (smart-leds `RGB8`).
pub trait ToRgb8 {
    /// Perform the conversion.
    fn to_rgb8(&self) -> Rgb;
}

impl ToRgb8 for Rgb {
    fn to_rgb8(&self) -> Rgb {
        *self
    }
}

impl ToRgb8 for Rgb888 {
    fn to_rgb8(&self) -> Rgb {
        Rgb::new(self.r(), self.g(), self.b())
    }
}

/// Convert a color to embedded-graphics [`Rgb888`].
pub trait ToRgb888 {
    /// Perform the conversion.
    fn to_rgb888(&self) -> Rgb888;
}

impl ToRgb888 for Rgb {
    fn to_rgb888(&self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl ToRgb888 for Rgb888 {
    fn to_rgb888(&self) -> Rgb888 {
        *self
    }
}

/// [`Rgb`] pixel data for the whole chain, in physical wiring order.
///
/// Frames deref to `[Rgb; N]`, so pixel slots can be inspected directly,
/// but writes normally go through the bounds-checked [`Matrix`] view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }

    /// Copy of this frame with every channel scaled by `brightness / 255`.
    ///
    /// Integer floor math, so brightness 255 is the identity and brightness 0
    /// is all black.
    #[must_use]
    pub fn scaled(&self, brightness: u8) -> Self {
        let mut scaled = *self;
        for pixel in scaled.iter_mut() {
            pixel.r = scale_channel(pixel.r, brightness);
            pixel.g = scale_channel(pixel.g, brightness);
            pixel.b = scale_channel(pixel.b, brightness);
        }
        scaled
    }
}

const fn scale_channel(channel: u8, brightness: u8) -> u8 {
    ((channel as u16 * brightness as u16) / 255) as u8
}

impl<const N: usize> Deref for Frame<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame<N> {
    fn from(array: [Rgb; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame<N>> for [Rgb; N] {
    fn from(frame: Frame<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The one hardware-facing operation: push `N` consecutive RGB triples out
/// to the strip.
///
/// The embedded implementation wraps the PIO WS2812 driver; host tests use a
/// recording fake.
pub trait StripDriver<const N: usize> {
    /// Update the strip with the given pixels, first LED on the chain first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hardware`] with a driver-specific code on failure.
    async fn update(&mut self, pixels: &[Rgb; N]) -> Result<()>;
}

/// Bounds-checked `(row, col)` view over a [`Frame`] of serpentine-wired LEDs.
///
/// `N` must equal `W * H`; construction asserts this at compile time when the
/// matrix is built in const context. All accessors validate coordinates or
/// chain indexes before touching the buffer, so a rejected call leaves the
/// frame exactly as it was.
#[derive(Clone, Copy, Debug)]
pub struct Matrix<const N: usize, const W: usize, const H: usize> {
    frame: Frame<N>,
}

impl<const N: usize, const W: usize, const H: usize> Matrix<N, W, H> {
    /// Total number of LEDs.
    pub const TOTAL: usize = N;
    /// Number of columns.
    pub const WIDTH: usize = W;
    /// Number of rows.
    pub const HEIGHT: usize = H;

    /// Create a matrix with every pixel black.
    ///
    /// # Panics
    ///
    /// Panics if `N != W * H` or either dimension is zero.
    #[must_use]
    pub const fn new() -> Self {
        assert!(N == W * H, "N must equal W * H");
        assert!(W > 0 && H > 0, "dimensions must be nonzero");
        Self {
            frame: Frame::new(),
        }
    }

    /// Color of the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if the coordinate is out of range.
    pub fn pixel(&self, row: usize, col: usize) -> Result<Rgb> {
        if row >= H || col >= W {
            return Err(Error::InvalidIndex);
        }
        self.pixel_at(SerpentineLayout::<W, H>::physical_index(row, col))
    }

    /// Color of the pixel at chain position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index >= N`.
    pub fn pixel_at(&self, index: usize) -> Result<Rgb> {
        self.frame.get(index).copied().ok_or(Error::InvalidIndex)
    }

    /// Set the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if the coordinate is out of range; the
    /// buffer is left unmodified.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Rgb) -> Result<()> {
        if row >= H || col >= W {
            return Err(Error::InvalidIndex);
        }
        self.set_pixel_at(SerpentineLayout::<W, H>::physical_index(row, col), color)
    }

    /// Set the pixel at chain position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index >= N`; the buffer is left
    /// unmodified.
    pub fn set_pixel_at(&mut self, index: usize, color: Rgb) -> Result<()> {
        let slot = self.frame.get_mut(index).ok_or(Error::InvalidIndex)?;
        *slot = color;
        Ok(())
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.frame = Frame::filled(color);
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.frame = Frame::new();
    }

    /// The frame in physical wiring order, as last written.
    #[must_use]
    pub const fn frame(&self) -> &Frame<N> {
        &self.frame
    }

    /// Scale the frame by `brightness` and push it to the strip.
    ///
    /// This is the only operation that touches hardware. Writes made since
    /// the previous commit all land in this one physical frame.
    ///
    /// # Errors
    ///
    /// Propagates the driver's [`Error::Hardware`] outcome unchanged.
    pub async fn commit<D: StripDriver<N>>(&self, driver: &mut D, brightness: u8) -> Result<()> {
        driver.update(&self.frame.scaled(brightness).0).await
    }
}

impl<const N: usize, const W: usize, const H: usize> Default for Matrix<N, W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const W: usize, const H: usize> OriginDimensions for Matrix<N, W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const N: usize, const W: usize, const H: usize> DrawTarget for Matrix<N, W, H> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let col = coord.x;
            let row = coord.y;
            if col >= 0 && col < W as i32 && row >= 0 && row < H as i32 {
                let index = SerpentineLayout::<W, H>::physical_index(row as usize, col as usize);
                if let Some(slot) = self.frame.get_mut(index) {
                    *slot = color.to_rgb8();
                }
            }
        }
        Ok(())
    }
}
