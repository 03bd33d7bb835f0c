//! Shared domain types.

pub mod role;
pub mod uid;

pub use role::{Role, RoleParseError};
pub use uid::{Uid, UidError};
