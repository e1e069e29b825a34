//! Session state and bearer token models.

pub mod secret;
pub mod session;

pub use secret::*;
pub use session::*;
