//! Access control — permissions, roles, and users.
//!
//! The hub only ever asks one question here: does the acting user's role
//! hold a given permission? Which roles exist and which permissions they
//! carry is collaborator data, assembled by the composition root.

mod permission;
mod role;
mod user;

pub use permission::Permission;
pub use role::Role;
pub use user::User;
