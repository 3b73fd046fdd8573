pub mod bench;
pub mod builder;
pub mod config;
pub mod goalkeeper;
pub mod positions;
pub mod tracking;

pub use bench::*;
pub use builder::*;
pub use config::*;
pub use goalkeeper::*;
pub use positions::*;
pub use tracking::*;
