pub mod error;
pub mod parse;

pub use error::Error;
pub use parse::parse_uint;
