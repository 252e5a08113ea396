mod common;
mod document;
mod profile;
mod records;
mod result;

pub use common::*;
pub use document::*;
pub use profile::*;
pub use records::*;
pub use result::*;
