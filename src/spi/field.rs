//! Declarative bitfield table for the packed registers.
//!
//! Every logical property is one [`BitField`]: owning register, bit offset,
//! width, encoding adjustment. The two generic functions here carry the
//! central invariant of the whole bridge: [`BitField::insert`] never
//! disturbs a bit outside the field's range.

use super::regs::SpiRegister;

/// How a field's external value maps to its stored bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Stored bits are the value itself.
    Direct,
    /// Stored bits are the value minus one (word size: 1..=32 maps to
    /// 0..=31).
    OffsetByOne,
}

/// A named view onto a sub-range of bits within one register.
#[derive(Debug, Clone, Copy)]
pub struct BitField {
    pub register: SpiRegister,
    pub shift: u32,
    pub width: u32,
    pub encoding: Encoding,
}

impl BitField {
    pub const fn new(register: SpiRegister, shift: u32, width: u32, encoding: Encoding) -> Self {
        Self {
            register,
            shift,
            width,
            encoding,
        }
    }

    /// Unshifted mask of `width` low bits.
    pub const fn mask(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// Decode: isolate the field, undo the stored encoding.
    pub fn extract(&self, reg_value: u32) -> u32 {
        let raw = (reg_value >> self.shift) & self.mask();
        match self.encoding {
            Encoding::Direct => raw,
            Encoding::OffsetByOne => raw.wrapping_add(1),
        }
    }

    /// Encode: apply the stored encoding and merge into `reg_value`,
    /// touching only this field's bit range. Values wider than the field
    /// are truncated to `width` bits.
    pub fn insert(&self, reg_value: u32, value: u32) -> u32 {
        let stored = match self.encoding {
            Encoding::Direct => value,
            Encoding::OffsetByOne => value.wrapping_sub(1),
        } & self.mask();
        (reg_value & !(self.mask() << self.shift)) | (stored << self.shift)
    }
}

/* FIELD TABLE */

/// Clock divisor, the whole BAUD register.
pub const BAUD_DIVISOR: BitField = BitField::new(SpiRegister::Baud, 0, 32, Encoding::Direct);
/// Bits per transfer word, CONTROL bits 0-4, stored as value minus one.
pub const WORD_SIZE: BitField = BitField::new(SpiRegister::Control, 0, 5, Encoding::OffsetByOne);
/// Chip select index, CONTROL bits 13-14.
pub const CS_SELECT: BitField = BitField::new(SpiRegister::Control, 13, 2, Encoding::Direct);
/// Transmitter/receiver/baud generator enable, CONTROL bit 15.
pub const CORE_ENABLE: BitField = BitField::new(SpiRegister::Control, 15, 1, Encoding::Direct);
/// Transmit FIFO port, the whole DATA register. Write-only in effect.
pub const TX_DATA: BitField = BitField::new(SpiRegister::Data, 0, 32, Encoding::Direct);
/// Receive FIFO empty flag, STATUS bit 2.
pub const RX_EMPTY: BitField = BitField::new(SpiRegister::Status, 2, 1, Encoding::Direct);
