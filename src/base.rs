//! Core abstractions: the buffer contract and the item model.
mod item;
mod replay_buffer;
pub use item::{Item, ItemShape, PaddedVec};
pub use replay_buffer::ReplayBufferBase;
