//! Ball/cushion proximity counting with a frame cooldown.

pub mod contacts;
pub mod counter;

pub use contacts::count_contacts;
pub use counter::CollisionCounter;
