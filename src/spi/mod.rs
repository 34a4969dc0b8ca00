pub mod ctl;
pub mod field;
pub mod regs;

pub use ctl::{SpiCtl, Status};
pub use regs::{IoRegion, SpiRegister};
