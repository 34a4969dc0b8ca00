//! Attribute nodes and module lifecycle.
//!
//! The embedding environment sees one control node with five child
//! attributes, each a text show/store pair. Store is best-effort ingest:
//! malformed input is swallowed, the call still reports the whole buffer as
//! consumed, and register state stays untouched. Reads never fail; nodes
//! without a meaningful readback render a fixed sentinel.

mod nodes;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use log::*;

use crate::config::{LW_BRIDGE_BASE, SPAN_IN_BYTES, SPI_BASE_OFFSET};
use crate::spi::ctl::SpiCtl;
use crate::spi::regs::IoRegion;
use crate::utils::Error;

bitflags! {
    /// Semantic access of an attribute node.
    pub struct AttrMode: u32 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
        const RDWR  = Self::READ.bits | Self::WRITE.bits;
    }
}

/// A named text attribute bridging to register state.
pub trait Attribute: Send + Sync {
    fn name(&self) -> &'static str;

    fn mode(&self) -> AttrMode;

    /// Render the current value, trailing newline included. Never fails.
    fn show(&self) -> String;

    /// Ingest `buf`. Always reports the whole buffer as consumed, even when
    /// the text does not parse; in that case no register is touched.
    fn store(&self, buf: &str) -> usize;

    fn readable(&self) -> bool {
        self.mode().contains(AttrMode::READ)
    }

    fn writable(&self) -> bool {
        self.mode().contains(AttrMode::WRITE)
    }
}

/// The loaded module: owns the bridge and the registered nodes.
///
/// Teardown drops the nodes first and the mapping last, and cannot fail.
pub struct SpiModule {
    ctl: Arc<SpiCtl>,
    nodes: Vec<Arc<dyn Attribute>>,
}

impl SpiModule {
    /// Map the controller at its fixed aperture address and register the
    /// attribute nodes.
    ///
    /// # Safety
    /// The lightweight bridge window must be reachable at its physical
    /// address (identity-mapped MMIO range or equivalent).
    pub unsafe fn init() -> Result<Self, Error> {
        Self::init_at(LW_BRIDGE_BASE + SPI_BASE_OFFSET)
    }

    /// Same as [`init`](Self::init) with an explicit window address.
    ///
    /// # Safety
    /// `base` must satisfy the contract of [`IoRegion::map`].
    pub unsafe fn init_at(base: usize) -> Result<Self, Error> {
        info!("spi: starting");
        // A failed mapping is fatal: no nodes come up.
        let region = IoRegion::map(base, SPAN_IN_BYTES)?;
        let ctl = Arc::new(SpiCtl::new(region));

        let mut module = Self {
            ctl: ctl.clone(),
            nodes: Vec::new(),
        };
        for node in nodes::make_all(&ctl) {
            // A node failure is logged and skipped; the rest still register.
            if let Err(e) = module.register(node.clone()) {
                error!("spi: failed to register {}: {:?}", node.name(), e);
            }
        }
        info!("spi: initialized");
        Ok(module)
    }

    fn register(&mut self, node: Arc<dyn Attribute>) -> Result<(), Error> {
        if self.nodes.iter().any(|n| n.name() == node.name()) {
            return Err(Error::EEXIST);
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Look up an attribute node by name.
    pub fn attr(&self, name: &str) -> Result<&Arc<dyn Attribute>, Error> {
        self.nodes
            .iter()
            .find(|n| n.name() == name)
            .ok_or(Error::ENOENT)
    }

    /// Registered nodes, in registration order.
    pub fn attrs(&self) -> &[Arc<dyn Attribute>] {
        &self.nodes
    }

    /// Direct access to the bridge for typed, non-text control.
    pub fn ctl(&self) -> &Arc<SpiCtl> {
        &self.ctl
    }

    /// Tear down: nodes first, then the mapping.
    pub fn shutdown(mut self) {
        self.nodes.clear();
        info!("spi: exiting");
    }
}
