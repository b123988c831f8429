//! BLE-controlled serpentine LED matrix for Pico 1 and 2.
//!
//! A remote client drives a WS2812 panel through a small attribute protocol:
//! a cursor selects a pixel (or every pixel), a brightness scalar dims the
//! whole display, and a color attribute reads or writes pixel state. A
//! fixed-cadence render loop owns the hardware; while a pairing passkey is
//! on screen it temporarily displaces the client's pixels.
//!
//! # Module map
//!
//! - [`layout`] — serpentine `(row, col)` ↔ chain-index mapping
//! - [`matrix`] — pixel frame, bounds-checked matrix view, driver seam
//! - [`service`] — control-protocol state and attribute handlers
//! - [`segments`] — digit glyphs on a 4×7 character grid
//! - [`passkey`] — pairing-passkey display override
//! - [`panel`] — service + override glued together per commit
//! - `run`, `driver`, `pio_irqs` — embedded render loop and WS2812 driver
//! - `ble` — GATT surface (feature `ble`)
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time checks: exactly one architecture must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "arm", feature = "riscv")), not(feature = "host")))]
compile_error!("Must enable exactly one architecture feature: 'arm' or 'riscv'");

#[cfg(all(feature = "arm", feature = "riscv"))]
compile_error!("Cannot enable both 'arm' and 'riscv' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

#[cfg(all(feature = "ble", not(feature = "host")))]
pub mod ble;
#[cfg(not(feature = "host"))]
pub mod driver;
mod error;
pub mod layout;
pub mod matrix;
pub mod panel;
pub mod passkey;
#[cfg(not(feature = "host"))]
pub mod pio_irqs;
#[cfg(not(feature = "host"))]
pub mod run;
pub mod segments;
pub mod service;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
