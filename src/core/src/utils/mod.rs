mod logging;
mod time;

pub use logging::*;
pub use time::*;
