//! Compile-time mapping between `(row, col)` coordinates and serpentine wiring order.
//!
//! See [`SerpentineLayout`] for the parity convention and worked examples.

/// Maps a rectangular `W`×`H` panel onto one continuous serpentine LED chain.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
/// `col` increases to the right, and `row` increases downward.
///
/// The chain enters the panel at the top-right corner, so even rows (0-based)
/// run right-to-left and odd rows run left-to-right:
///
/// ```text
/// 4×3 panel, LED numbers in wiring order:
///
///   LED3  LED2  LED1  LED0
///   LED4  LED5  LED6  LED7
///   LED11 LED10 LED9  LED8
/// ```
///
/// Both directions of the mapping are `const fn`, so geometry mistakes can be
/// caught at compile time:
///
/// ```rust
/// use matrix_envoy::layout::SerpentineLayout;
///
/// type Panel = SerpentineLayout<16, 16>;
///
/// const _: () = assert!(Panel::physical_index(0, 0) == 15);
/// const _: () = assert!(Panel::physical_index(1, 0) == 16);
/// const _: () = {
///     let (row, col) = Panel::logical_coords(16);
///     assert!(row == 1 && col == 0);
/// };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerpentineLayout<const W: usize, const H: usize>;

impl<const W: usize, const H: usize> SerpentineLayout<W, H> {
    /// Total number of LEDs on the chain.
    pub const TOTAL: usize = W * H;

    /// Number of columns in the panel.
    #[must_use]
    pub const fn width() -> usize {
        W
    }

    /// Number of rows in the panel.
    #[must_use]
    pub const fn height() -> usize {
        H
    }

    /// Position on the chain of the LED at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= H` or `col >= W`. Callers that need fallible access
    /// go through the matrix view, which bounds-checks first.
    #[must_use]
    pub const fn physical_index(row: usize, col: usize) -> usize {
        assert!(row < H, "row out of bounds");
        assert!(col < W, "column out of bounds");
        let mapped_col = if row % 2 == 0 { W - 1 - col } else { col };
        row * W + mapped_col
    }

    /// `(row, col)` of the LED at chain position `index`.
    ///
    /// Exact inverse of [`physical_index`](Self::physical_index): mirrored rows
    /// are un-mirrored with the same parity rule.
    ///
    /// # Panics
    ///
    /// Panics if `index >= W * H`.
    #[must_use]
    pub const fn logical_coords(index: usize) -> (usize, usize) {
        assert!(index < W * H, "index out of bounds");
        let row = index / W;
        let mapped_col = index % W;
        let col = if row % 2 == 0 { W - 1 - mapped_col } else { mapped_col };
        (row, col)
    }
}
