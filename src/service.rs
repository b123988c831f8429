//! Control-protocol state for a remotely driven matrix or strip.
//!
//! A service owns the pixel state plus two scalars a remote client writes
//! through an attribute protocol: a signed cursor selecting one pixel (or
//! `-1` for broadcast) and a global brightness. Handlers are synchronous and
//! never touch hardware; the render loop publishes the accumulated state on
//! its next commit.
//!
//! Multi-byte attribute values are little-endian on the wire.
//!
//! # Example
//!
//! ```rust
//! use matrix_envoy::service::MatrixService;
//!
//! let mut service = MatrixService::<256, 16, 16>::new();
//! service.write_cursor(0, &16i16.to_le_bytes())?;
//! service.write_color(0, &[10, 20, 30])?;
//! assert_eq!(service.read_color()?, [10, 20, 30]);
//! # Ok::<(), matrix_envoy::Error>(())
//! ```

use heapless::Vec;
use itertools::Itertools as _;

use crate::matrix::{Frame, Matrix, Rgb, StripDriver};
use crate::{Error, Result};

/// Largest number of bytes a single scratch-region read returns.
pub const MAX_READ_CHUNK: usize = 510;

/// Cursor value meaning "every pixel".
pub const CURSOR_BROADCAST: i16 = -1;

/// Parse and validate a cursor write: exactly 2 little-endian bytes at
/// offset 0, value in `-1..total`.
fn parse_cursor(offset: u16, data: &[u8], total: usize) -> Result<i16> {
    if offset != 0 {
        return Err(Error::InvalidLength);
    }
    let &[lo, hi] = data else {
        return Err(Error::InvalidLength);
    };
    let value = i16::from_le_bytes([lo, hi]);
    if value < CURSOR_BROADCAST || i32::from(value) >= total as i32 {
        return Err(Error::InvalidValue);
    }
    Ok(value)
}

/// Parse a brightness write: exactly 1 byte at offset 0. Any value is valid.
fn parse_brightness(offset: u16, data: &[u8]) -> Result<u8> {
    if offset != 0 {
        return Err(Error::InvalidLength);
    }
    let &[value] = data else {
        return Err(Error::InvalidLength);
    };
    Ok(value)
}

/// Control state for a matrix addressed one pixel at a time.
///
/// Color reads are computed lazily from the matrix at the cursor cell; color
/// writes land in the matrix immediately but reach the LEDs only at the next
/// commit.
#[derive(Clone, Copy, Debug)]
pub struct MatrixService<const N: usize, const W: usize, const H: usize> {
    matrix: Matrix<N, W, H>,
    cursor: i16,
    brightness: u8,
}

impl<const N: usize, const W: usize, const H: usize> MatrixService<N, W, H> {
    /// Create a service with a black matrix, cursor 0, and full brightness.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            matrix: Matrix::new(),
            cursor: 0,
            brightness: u8::MAX,
        }
    }

    /// Matrix width as a little-endian attribute value.
    #[must_use]
    pub const fn read_width(&self) -> [u8; 2] {
        (W as u16).to_le_bytes()
    }

    /// Matrix height as a little-endian attribute value.
    #[must_use]
    pub const fn read_height(&self) -> [u8; 2] {
        (H as u16).to_le_bytes()
    }

    /// Current cursor as a little-endian attribute value.
    #[must_use]
    pub const fn read_cursor(&self) -> [u8; 2] {
        self.cursor.to_le_bytes()
    }

    /// Handle a cursor write.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] unless `data` is exactly 2 bytes at offset 0;
    /// [`Error::InvalidValue`] unless `-1 <= value < N`. The cursor is
    /// unchanged on rejection.
    pub fn write_cursor(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        self.cursor = parse_cursor(offset, data, N)?;
        Ok(())
    }

    /// Current brightness.
    #[must_use]
    pub const fn read_brightness(&self) -> u8 {
        self.brightness
    }

    /// Handle a brightness write (exactly 1 byte; any value accepted).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] unless `data` is exactly 1 byte at offset 0.
    pub fn write_brightness(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        self.brightness = parse_brightness(offset, data)?;
        Ok(())
    }

    /// Color of the pixel under the cursor, computed from the matrix.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedRead`] while the cursor is `-1`.
    pub fn read_color(&self) -> Result<[u8; 3]> {
        if self.cursor < 0 {
            return Err(Error::UndefinedRead);
        }
        let pixel = self.matrix.pixel_at(self.cursor as usize)?;
        Ok([pixel.r, pixel.g, pixel.b])
    }

    /// Handle a color write: set the pixel under the cursor, or every pixel
    /// while the cursor is `-1`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] unless `data` is exactly 3 bytes at offset 0.
    pub fn write_color(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        if offset != 0 {
            return Err(Error::InvalidLength);
        }
        let &[red, green, blue] = data else {
            return Err(Error::InvalidLength);
        };
        let color = Rgb::new(red, green, blue);
        if self.cursor < 0 {
            self.matrix.fill(color);
            return Ok(());
        }
        self.matrix.set_pixel_at(self.cursor as usize, color)
    }

    /// Current cursor value.
    #[must_use]
    pub const fn cursor(&self) -> i16 {
        self.cursor
    }

    /// Read access to the underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix<N, W, H> {
        &self.matrix
    }

    /// Mutable access to the underlying matrix.
    pub const fn matrix_mut(&mut self) -> &mut Matrix<N, W, H> {
        &mut self.matrix
    }

    /// Commit the matrix at the current brightness.
    ///
    /// # Errors
    ///
    /// Propagates the driver's [`Error::Hardware`] outcome unchanged.
    pub async fn commit<D: StripDriver<N>>(&self, driver: &mut D) -> Result<()> {
        self.matrix.commit(driver, self.brightness).await
    }
}

impl<const N: usize, const W: usize, const H: usize> Default for MatrixService<N, W, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Control state for a bare strip addressed through a byte scratch region.
///
/// The region holds `N * 3` color bytes (`B` must equal `N * 3`). Reads and
/// writes are positioned at `cursor * 3 + offset`; each render tick folds the
/// region into an output frame.
#[derive(Clone, Copy, Debug)]
pub struct StripService<const N: usize, const B: usize> {
    scratch: [u8; B],
    cursor: i16,
    brightness: u8,
}

impl<const N: usize, const B: usize> StripService<N, B> {
    /// Create a service with a black region, cursor 0, and full brightness.
    ///
    /// # Panics
    ///
    /// Panics if `B != N * 3`.
    #[must_use]
    pub const fn new() -> Self {
        assert!(B == N * 3, "B must equal N * 3");
        Self {
            scratch: [0; B],
            cursor: 0,
            brightness: u8::MAX,
        }
    }

    /// Strip length in LEDs as a little-endian attribute value.
    #[must_use]
    pub const fn read_length(&self) -> [u8; 2] {
        (N as u16).to_le_bytes()
    }

    /// Current cursor as a little-endian attribute value.
    #[must_use]
    pub const fn read_cursor(&self) -> [u8; 2] {
        self.cursor.to_le_bytes()
    }

    /// Handle a cursor write.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] unless `data` is exactly 2 bytes at offset 0;
    /// [`Error::InvalidValue`] unless `-1 <= value < N`. The cursor is
    /// unchanged on rejection.
    pub fn write_cursor(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        self.cursor = parse_cursor(offset, data, N)?;
        Ok(())
    }

    /// Current brightness.
    #[must_use]
    pub const fn read_brightness(&self) -> u8 {
        self.brightness
    }

    /// Handle a brightness write (exactly 1 byte; any value accepted).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] unless `data` is exactly 1 byte at offset 0.
    pub fn write_brightness(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        self.brightness = parse_brightness(offset, data)?;
        Ok(())
    }

    /// Read up to [`MAX_READ_CHUNK`] scratch bytes starting at
    /// `cursor * 3 + offset`. Past the end of the region the result is empty.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedRead`] while the cursor is `-1`.
    pub fn read_color(&self, offset: u16) -> Result<Vec<u8, MAX_READ_CHUNK>> {
        if self.cursor < 0 {
            return Err(Error::UndefinedRead);
        }
        let start = (self.cursor as usize) * 3 + offset as usize;
        let mut out = Vec::new();
        out.extend(self.scratch.iter().skip(start).take(MAX_READ_CHUNK).copied());
        Ok(out)
    }

    /// Handle a color write into the scratch region at `cursor * 3 + offset`.
    ///
    /// While the cursor is `-1`, the write must be exactly 3 bytes at offset
    /// 0 and broadcasts that color across the whole region.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if the write would run past the end of the
    /// region, or if a broadcast write is not exactly 3 bytes at offset 0.
    /// The region is unchanged on rejection.
    pub fn write_color(&mut self, offset: u16, data: &[u8]) -> Result<()> {
        if self.cursor < 0 {
            if offset != 0 || data.len() != 3 {
                return Err(Error::InvalidLength);
            }
            for chunk in self.scratch.chunks_exact_mut(3) {
                chunk.copy_from_slice(data);
            }
            return Ok(());
        }
        let start = (self.cursor as usize) * 3 + offset as usize;
        let end = start.checked_add(data.len()).ok_or(Error::InvalidLength)?;
        let region = self
            .scratch
            .get_mut(start..end)
            .ok_or(Error::InvalidLength)?;
        region.copy_from_slice(data);
        Ok(())
    }

    /// Current cursor value.
    #[must_use]
    pub const fn cursor(&self) -> i16 {
        self.cursor
    }

    /// Fold the scratch region into a frame in wiring order.
    #[must_use]
    pub fn render_frame(&self) -> Frame<N> {
        let mut frame = Frame::new();
        for (slot, (red, green, blue)) in frame
            .iter_mut()
            .zip(self.scratch.iter().copied().tuples())
        {
            *slot = Rgb::new(red, green, blue);
        }
        frame
    }

    /// Fold the region into a frame and commit it at the current brightness.
    ///
    /// # Errors
    ///
    /// Propagates the driver's [`Error::Hardware`] outcome unchanged.
    pub async fn commit<D: StripDriver<N>>(&self, driver: &mut D) -> Result<()> {
        driver
            .update(&self.render_frame().scaled(self.brightness).0)
            .await
    }
}

impl<const N: usize, const B: usize> Default for StripService<N, B> {
    fn default() -> Self {
        Self::new()
    }
}
