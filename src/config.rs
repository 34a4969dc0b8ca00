//! Hardware address map for the SPI IP core.
//!
//! The core hangs off the DE1-SoC lightweight HPS-to-FPGA bridge at a fixed
//! offset. Everything below is defined by the FPGA address map, not derived
//! at runtime.

/* APERTURE */
pub const LW_BRIDGE_BASE: usize = 0xFF20_0000;
pub const SPI_BASE_OFFSET: usize = 0x8000;
pub const SPAN_IN_BYTES: usize = 16;

/// IRQ line of the core on the HPS side. Wired, but unused by this bridge.
pub const SPI_IRQ: usize = 80;

/* REGISTER BYTE OFFSETS */
pub const OFS_DATA: usize = 0x0;
pub const OFS_STATUS: usize = 0x4;
pub const OFS_CONTROL: usize = 0x8;
pub const OFS_BAUD: usize = 0xC;
