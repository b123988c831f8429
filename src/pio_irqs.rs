//! Crate-level PIO interrupt bindings shared by the strip driver.
#![allow(
    unsafe_code,
    reason = "bind_interrupts! expands to unsafe interrupt impls"
)]

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::InterruptHandler;

bind_interrupts!(
    /// Interrupt bindings for PIO0.
    pub struct Pio0Irqs {
        PIO0_IRQ_0 => InterruptHandler<PIO0>;
    }
);

bind_interrupts!(
    /// Interrupt bindings for PIO1.
    pub struct Pio1Irqs {
        PIO1_IRQ_0 => InterruptHandler<PIO1>;
    }
);

#[cfg(feature = "pico2")]
bind_interrupts!(
    /// Interrupt bindings for PIO2 (RP235x only).
    pub struct Pio2Irqs {
        PIO2_IRQ_0 => InterruptHandler<embassy_rp::peripherals::PIO2>;
    }
);
