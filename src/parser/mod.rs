//! MSG parsing: MAPI property streams over the compound-document container.

pub mod msg;
pub mod properties;

pub use msg::{from_reader, parse_msg};
