mod block;
pub use block::{xor_into, Block};
