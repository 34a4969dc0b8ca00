//! The control bridge: serialized read-modify-write over the field table.

use log::*;
use spin::Mutex;

use super::field::{self, BitField};
use super::regs::{IoRegion, SpiRegister};

bitflags! {
    /// STATUS register flags.
    pub struct Status: u32 {
        const RX_OVERFLOW = 1 << 0;
        const RX_FULL     = 1 << 1;
        const RX_EMPTY    = 1 << 2;
        const TX_OVERFLOW = 1 << 3;
        const TX_FULL     = 1 << 4;
        const TX_EMPTY    = 1 << 5;
    }
}

/// Bridge over the mapped register window.
///
/// One mutex per register serializes every read-modify-write sequence, so
/// two concurrent writers of disjoint CONTROL fields both take effect.
/// Plain reads take no lock; a single volatile load is already consistent.
pub struct SpiCtl {
    region: IoRegion,
    locks: [Mutex<()>; 4],
}

impl SpiCtl {
    pub fn new(region: IoRegion) -> Self {
        Self {
            region,
            locks: [
                Mutex::new(()),
                Mutex::new(()),
                Mutex::new(()),
                Mutex::new(()),
            ],
        }
    }

    fn lock_of(&self, reg: SpiRegister) -> &Mutex<()> {
        &self.locks[reg as usize]
    }

    /// Read a field: one volatile load plus pure decode.
    pub fn read_field(&self, f: &BitField) -> u32 {
        f.extract(self.region.read(f.register))
    }

    /// Write a field under the owning register's lock: read, merge the new
    /// value into exactly the field's bit range, write back. Whole-word
    /// fields ride the same path; their merge is a plain overwrite.
    pub fn write_field(&self, f: &BitField, value: u32) {
        let guard = self.lock_of(f.register).lock();
        let merged = f.insert(self.region.read(f.register), value);
        self.region.write(f.register, merged);
        drop(guard);
        trace!("spi: {:?} <- {:#010x}", f.register, merged);
    }

    /* typed accessors */

    pub fn baud_divisor(&self) -> u32 {
        self.read_field(&field::BAUD_DIVISOR)
    }

    pub fn set_baud_divisor(&self, div: u32) {
        self.write_field(&field::BAUD_DIVISOR, div)
    }

    /// Bits per transfer word as the hardware will use it (stored encoding
    /// is value minus one; the adjustment lives in the field table).
    pub fn word_size(&self) -> u32 {
        self.read_field(&field::WORD_SIZE)
    }

    pub fn set_word_size(&self, bits: u32) {
        self.write_field(&field::WORD_SIZE, bits)
    }

    pub fn cs_select(&self) -> u32 {
        self.read_field(&field::CS_SELECT)
    }

    pub fn set_cs_select(&self, index: u32) {
        self.write_field(&field::CS_SELECT, index)
    }

    /// Enable or disable the transmitter, receiver and baud generator.
    pub fn set_core_enable(&self, enable: bool) {
        self.write_field(&field::CORE_ENABLE, enable as u32)
    }

    pub fn core_enable(&self) -> bool {
        self.read_field(&field::CORE_ENABLE) != 0
    }

    /// Push one word into the transmit FIFO. DATA is a port, not storage:
    /// the write is a direct overwrite and the value cannot be read back.
    pub fn push_tx(&self, word: u32) {
        self.write_field(&field::TX_DATA, word)
    }

    pub fn status(&self) -> Status {
        Status::from_bits_truncate(self.region.read(SpiRegister::Status))
    }

    pub fn rx_empty(&self) -> bool {
        self.read_field(&field::RX_EMPTY) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::regs::IoRegion;

    fn fake_ctl() -> (SpiCtl, *mut [u32; 4]) {
        let mem = Box::into_raw(Box::new([0u32; 4]));
        let region = unsafe { IoRegion::map(mem as usize, 16) }.unwrap();
        (SpiCtl::new(region), mem)
    }

    #[test]
    fn typed_accessors_round_trip() {
        let (ctl, mem) = fake_ctl();
        ctl.set_baud_divisor(115200);
        ctl.set_word_size(8);
        ctl.set_cs_select(2);
        ctl.set_core_enable(true);
        assert_eq!(ctl.baud_divisor(), 115200);
        assert_eq!(ctl.word_size(), 8);
        assert_eq!(ctl.cs_select(), 2);
        assert!(ctl.core_enable());
        drop(ctl);
        drop(unsafe { Box::from_raw(mem) });
    }

    #[test]
    fn status_flags_decode() {
        let (ctl, mem) = fake_ctl();
        unsafe { (mem as *mut u32).add(1).write_volatile(0b10_0101) };
        let s = ctl.status();
        assert!(s.contains(Status::RX_OVERFLOW));
        assert!(s.contains(Status::RX_EMPTY));
        assert!(s.contains(Status::TX_EMPTY));
        assert!(!s.contains(Status::TX_FULL));
        assert!(ctl.rx_empty());
        drop(ctl);
        drop(unsafe { Box::from_raw(mem) });
    }
}
