pub mod validator;
pub mod violation;

pub use validator::*;
pub use violation::*;
