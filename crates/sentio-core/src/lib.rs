mod aggregate;
mod chart;
mod error;
mod message;
mod reader;

pub use aggregate::*;
pub use chart::*;
pub use error::ReadError;
pub use message::*;
pub use reader::*;
