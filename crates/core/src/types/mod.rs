//! Core types for Pachara.

pub mod id;
pub mod username;

pub use id::*;
pub use username::{Username, UsernameError};
