pub mod primitives;
pub mod quantity;
