//! Control-plane bridge for the SPI IP core on the DE1-SoC.
//!
//! The controller sits at a fixed offset inside the lightweight HPS-to-FPGA
//! bridge aperture and exposes four 32-bit registers (DATA, STATUS, CONTROL,
//! BAUD). This crate maps that window once and bridges named text attributes
//! (`baudrate`, `word_size`, `cs_select`, `tx_data`, `rx_data`) onto
//! bit-exact register reads and read-modify-write updates.
//!
//! Layering, leaves first:
//!
//! - [`spi::regs`]: the mapped window and volatile whole-register access
//! - [`spi::field`]: the declarative bitfield table with generic
//!   extract/insert
//! - [`spi::ctl`]: serialized read-modify-write plus typed accessors
//! - [`sysfs`]: attribute nodes and module init/teardown

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate alloc;

pub mod config;
pub mod spi;
pub mod sysfs;
pub mod utils;

pub use spi::ctl::{SpiCtl, Status};
pub use spi::regs::{IoRegion, SpiRegister};
pub use sysfs::{AttrMode, Attribute, SpiModule};
pub use utils::Error;
