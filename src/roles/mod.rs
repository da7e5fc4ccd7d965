//! Role-based access checks
//!
//! Roles are bare numeric weights; ordering and assignment live entirely
//! outside this module. The matcher decides membership of a weight in an
//! allowed specification and fails closed on anything malformed.

mod allowed;
pub mod weights;

pub use allowed::{check_role, Allowed, RoleRange};
pub use weights::RoleTable;
