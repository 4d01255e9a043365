pub mod errors;
pub mod records;
pub mod tables;

pub use errors::*;
pub use records::*;
pub use tables::*;
