//! Register access layer for the SPI IP core.
//!
//! [`IoRegion`] owns the mapped window and performs volatile whole-register
//! loads and stores. Bitfield knowledge lives one layer up, in
//! [`field`](super::field).

use core::ptr::{read_volatile, write_volatile};

use crate::config::{OFS_BAUD, OFS_CONTROL, OFS_DATA, OFS_STATUS, SPAN_IN_BYTES};
use crate::utils::Error;

/// The four registers of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiRegister {
    Data,
    Status,
    Control,
    Baud,
}

impl SpiRegister {
    pub const fn byte_offset(self) -> usize {
        match self {
            SpiRegister::Data => OFS_DATA,
            SpiRegister::Status => OFS_STATUS,
            SpiRegister::Control => OFS_CONTROL,
            SpiRegister::Baud => OFS_BAUD,
        }
    }
}

/// Exclusively owned mapping of the controller's register window.
///
/// The window is valid exactly as long as this value lives; the bridge that
/// consumes it releases it on drop, so access before init or after teardown
/// is not expressible. The registers are hardware state that changes behind
/// the program's back: every access is volatile, and a store never merges
/// with prior register contents on its own.
pub struct IoRegion {
    base: *mut u32,
    span: usize,
}

// One fixed device-memory window with a single owner. The read-modify-write
// discipline is enforced by the bridge locks, not here.
unsafe impl Send for IoRegion {}
unsafe impl Sync for IoRegion {}

impl IoRegion {
    /// Map the register window at `base`.
    ///
    /// # Safety
    /// `base..base + span` must be a live device-memory mapping of the SPI
    /// core's registers, and no other `IoRegion` may cover it.
    pub unsafe fn map(base: usize, span: usize) -> Result<Self, Error> {
        if base == 0 {
            return Err(Error::ENODEV);
        }
        if base % core::mem::align_of::<u32>() != 0 || span < SPAN_IN_BYTES {
            return Err(Error::EINVAL);
        }
        Ok(Self {
            base: base as *mut u32,
            span,
        })
    }

    /// Volatile whole-register load.
    pub fn read(&self, reg: SpiRegister) -> u32 {
        unsafe { read_volatile(self.reg_ptr(reg)) }
    }

    /// Volatile whole-register store. Callers that must preserve other bits
    /// read first, explicitly.
    pub fn write(&self, reg: SpiRegister, value: u32) {
        unsafe { write_volatile(self.reg_ptr(reg), value) }
    }

    fn reg_ptr(&self, reg: SpiRegister) -> *mut u32 {
        let offset = reg.byte_offset();
        assert!(offset + 4 <= self.span, "register access outside mapped span");
        unsafe { self.base.add(offset / 4) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_rejects_bad_windows() {
        assert_eq!(unsafe { IoRegion::map(0, 16) }.err(), Some(Error::ENODEV));
        assert_eq!(unsafe { IoRegion::map(0x1002, 16) }.err(), Some(Error::EINVAL));
        assert_eq!(unsafe { IoRegion::map(0x1000, 8) }.err(), Some(Error::EINVAL));
    }

    #[test]
    fn registers_address_distinct_words() {
        let mem = Box::into_raw(Box::new([0u32; 4]));
        let region = unsafe { IoRegion::map(mem as usize, 16) }.unwrap();
        region.write(SpiRegister::Data, 0x11);
        region.write(SpiRegister::Status, 0x22);
        region.write(SpiRegister::Control, 0x33);
        region.write(SpiRegister::Baud, 0x44);
        assert_eq!(region.read(SpiRegister::Data), 0x11);
        assert_eq!(region.read(SpiRegister::Status), 0x22);
        assert_eq!(region.read(SpiRegister::Control), 0x33);
        assert_eq!(region.read(SpiRegister::Baud), 0x44);
        drop(region);
        drop(unsafe { Box::from_raw(mem) });
    }
}
