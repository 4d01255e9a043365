pub mod binary;
pub mod json;


pub use binary::{
    block_from_bytes, deserialize_block, deserialize_block_with_type, serialize_block,
    serialize_block_into,
};
pub use json::{deserialize_block_json, deserialize_block_json_value};
