//! WS2812 strip driver over RP2040/RP235x PIO.
//!
//! Thin [`StripDriver`] adapter around embassy-rp's packaged WS2812 PIO
//! driver. Construct the inner driver with the crate-level interrupt
//! bindings from [`pio_irqs`](crate::pio_irqs):
//!
//! ```rust,ignore
//! use embassy_rp::pio::Pio;
//! use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
//! use matrix_envoy::driver::Ws2812Strip;
//! use matrix_envoy::pio_irqs::Pio0Irqs;
//!
//! let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Pio0Irqs);
//! let program = PioWs2812Program::new(&mut common);
//! let driver = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_2, &program);
//! let mut strip = Ws2812Strip::<_, 0, 256, _>::new(driver);
//! ```

use embassy_rp::pio::Instance;
use embassy_rp::pio_programs::ws2812::{PioWs2812, RgbColorOrder};

use crate::matrix::{Rgb, StripDriver};
use crate::Result;

/// [`StripDriver`] implementation for a WS2812 chain on a PIO state machine.
pub struct Ws2812Strip<'d, PIO, const SM: usize, const N: usize, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    driver: PioWs2812<'d, PIO, SM, N, ORDER>,
}

impl<'d, PIO, const SM: usize, const N: usize, ORDER> Ws2812Strip<'d, PIO, SM, N, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    /// Wrap a configured PIO WS2812 driver.
    #[must_use]
    pub fn new(driver: PioWs2812<'d, PIO, SM, N, ORDER>) -> Self {
        Self { driver }
    }
}

impl<'d, PIO, const SM: usize, const N: usize, ORDER> StripDriver<N>
    for Ws2812Strip<'d, PIO, SM, N, ORDER>
where
    PIO: Instance,
    ORDER: RgbColorOrder,
{
    async fn update(&mut self, pixels: &[Rgb; N]) -> Result<()> {
        self.driver.write(pixels).await;
        Ok(())
    }
}
