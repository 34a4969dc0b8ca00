//! The five attribute nodes of the control node.
//!
//! Each node is a small `Arc`-wrapped view over the shared bridge, in the
//! same shape as a device file node: construct, register, forget.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{AttrMode, Attribute};
use crate::spi::ctl::SpiCtl;
use crate::utils::parse::parse_uint;

pub(super) fn make_all(ctl: &Arc<SpiCtl>) -> Vec<Arc<dyn Attribute>> {
    let mut all: Vec<Arc<dyn Attribute>> = Vec::with_capacity(5);
    all.push(BaudRate::new(ctl.clone()));
    all.push(WordSize::new(ctl.clone()));
    all.push(CsSelect::new(ctl.clone()));
    all.push(TxData::new(ctl.clone()));
    all.push(RxData::new(ctl.clone()));
    all
}

/// `baudrate`: the clock divisor, the whole BAUD register.
pub struct BaudRate {
    ctl: Arc<SpiCtl>,
}

impl BaudRate {
    pub fn new(ctl: Arc<SpiCtl>) -> Arc<Self> {
        Arc::new(Self { ctl })
    }
}

impl Attribute for BaudRate {
    fn name(&self) -> &'static str {
        "baudrate"
    }
    fn mode(&self) -> AttrMode {
        AttrMode::RDWR
    }
    fn show(&self) -> String {
        format!("{}\n", self.ctl.baud_divisor())
    }
    fn store(&self, buf: &str) -> usize {
        if let Ok(div) = parse_uint(buf) {
            self.ctl.set_baud_divisor(div);
        }
        buf.len()
    }
}

/// `word_size`: bits per transfer word, CONTROL bits 0-4.
pub struct WordSize {
    ctl: Arc<SpiCtl>,
}

impl WordSize {
    pub fn new(ctl: Arc<SpiCtl>) -> Arc<Self> {
        Arc::new(Self { ctl })
    }
}

impl Attribute for WordSize {
    fn name(&self) -> &'static str {
        "word_size"
    }
    fn mode(&self) -> AttrMode {
        AttrMode::RDWR
    }
    fn show(&self) -> String {
        format!("{}\n", self.ctl.word_size())
    }
    fn store(&self, buf: &str) -> usize {
        if let Ok(bits) = parse_uint(buf) {
            self.ctl.set_word_size(bits);
        }
        buf.len()
    }
}

/// `cs_select`: chip select index, CONTROL bits 13-14.
pub struct CsSelect {
    ctl: Arc<SpiCtl>,
}

impl CsSelect {
    pub fn new(ctl: Arc<SpiCtl>) -> Arc<Self> {
        Arc::new(Self { ctl })
    }
}

impl Attribute for CsSelect {
    fn name(&self) -> &'static str {
        "cs_select"
    }
    fn mode(&self) -> AttrMode {
        AttrMode::RDWR
    }
    fn show(&self) -> String {
        format!("{}\n", self.ctl.cs_select())
    }
    fn store(&self, buf: &str) -> usize {
        if let Ok(index) = parse_uint(buf) {
            self.ctl.set_cs_select(index);
        }
        buf.len()
    }
}

/// `tx_data`: transmit FIFO port. A read cannot recover what was pushed;
/// show renders the `NAN` sentinel instead of guessing.
pub struct TxData {
    ctl: Arc<SpiCtl>,
}

impl TxData {
    pub fn new(ctl: Arc<SpiCtl>) -> Arc<Self> {
        Arc::new(Self { ctl })
    }
}

impl Attribute for TxData {
    fn name(&self) -> &'static str {
        "tx_data"
    }
    fn mode(&self) -> AttrMode {
        AttrMode::WRITE
    }
    fn show(&self) -> String {
        String::from("NAN\n")
    }
    fn store(&self, buf: &str) -> usize {
        if let Ok(word) = parse_uint(buf) {
            self.ctl.push_tx(word);
        }
        buf.len()
    }
}

/// `rx_data`: receive presence, derived from the STATUS empty flag. The
/// literal received word is never exposed here; reading the FIFO port would
/// consume it as a side effect.
pub struct RxData {
    ctl: Arc<SpiCtl>,
}

impl RxData {
    pub fn new(ctl: Arc<SpiCtl>) -> Arc<Self> {
        Arc::new(Self { ctl })
    }
}

impl Attribute for RxData {
    fn name(&self) -> &'static str {
        "rx_data"
    }
    fn mode(&self) -> AttrMode {
        AttrMode::READ
    }
    fn show(&self) -> String {
        if self.ctl.rx_empty() {
            String::from("-1\n")
        } else {
            String::from("Not EMPTY\n")
        }
    }
    fn store(&self, buf: &str) -> usize {
        // Ingest is discarded; the receive path is read-only.
        buf.len()
    }
}
