//! Table intake: payload decoding, header resolution and row preparation.

pub mod prepare;
pub mod source;
pub mod types;

pub use prepare::prepare_rows;
pub use source::{PayloadSource, TableSource};
pub use types::*;

pub const TARGET_TABLE: &str = "table";
