pub mod block_type;
pub mod blocks;
pub mod errors;

pub use block_type::*;
pub use blocks::*;
pub use errors::*;
