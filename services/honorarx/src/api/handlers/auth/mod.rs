//! Authentication: signup, login, sessions, email verification, and
//! password reset.

pub mod login;
pub mod password_reset;
pub(crate) mod principal;
pub mod session;
pub mod signup;
pub(crate) mod state;
pub(crate) mod storage;
pub mod types;
pub(crate) mod utils;
pub mod verification;

pub use state::{AppState, AuthConfig};
