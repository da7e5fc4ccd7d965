//! svckit - shared utilities for platform API services
//!
//! Object validation and filtering, role-based access predicates, error
//! normalization, and small request-handling helpers. Everything here is a
//! synchronous, stateless transformation; nothing holds locks, caches, or
//! connections, so every function is safe to call concurrently.

pub mod files;
pub mod keys;
pub mod net;
pub mod redact;
pub mod report;
pub mod roles;
pub mod schema;
