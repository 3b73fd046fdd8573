pub mod availability;
pub mod player;
pub mod position;

pub use availability::*;
pub use player::*;
pub use position::*;
