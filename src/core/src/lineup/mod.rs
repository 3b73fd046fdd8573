pub mod events;
pub mod grid;
pub mod period;
pub mod snapshot;
pub mod stats;

pub use events::*;
pub use grid::*;
pub use period::*;
pub use snapshot::*;
pub use stats::*;
