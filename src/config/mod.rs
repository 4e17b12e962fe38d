//! Configuration and path management

pub mod paths;
pub mod session;

pub use paths::CaravelPaths;
pub use session::{SessionStore, SessionToken};
