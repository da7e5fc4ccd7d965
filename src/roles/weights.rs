//! Role weight constants
//!
//! The platform's fixed role-name-to-weight table. Weights are process-wide
//! configuration data with no mutation after initialization: construct a
//! [`RoleTable`] once at startup and pass it by reference.

use std::collections::BTreeMap;

/// Full platform access
pub const ROOT: i64 = 100;
/// Internal platform services
pub const SYSTEM: i64 = 50;
/// First-party service accounts
pub const SERVICE: i64 = 40;
/// Authenticated end users
pub const USER: i64 = 30;
/// Background processing workers
pub const WORKER: i64 = 20;
/// Registered client applications
pub const APPLICATION: i64 = 10;
/// Unauthenticated access
pub const PUBLIC: i64 = 0;

/// Immutable role-name-to-weight lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    weights: BTreeMap<String, i64>,
}

impl RoleTable {
    /// The platform's built-in role table.
    pub fn builtin() -> Self {
        Self::with_weights([
            ("root", ROOT),
            ("system", SYSTEM),
            ("service", SERVICE),
            ("user", USER),
            ("worker", WORKER),
            ("application", APPLICATION),
            ("public", PUBLIC),
        ])
    }

    /// Builds a table from explicit name/weight pairs.
    pub fn with_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
        }
    }

    /// Looks up the weight for a role name.
    pub fn weight(&self, name: &str) -> Option<i64> {
        self.weights.get(name).copied()
    }

    /// Iterates known roles.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.weights.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Number of known roles.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_weights() {
        let table = RoleTable::builtin();
        assert_eq!(table.weight("root"), Some(ROOT));
        assert_eq!(table.weight("user"), Some(USER));
        assert_eq!(table.weight("public"), Some(PUBLIC));
        assert_eq!(table.weight("intruder"), None);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_ordering_reflects_privilege() {
        assert!(ROOT > SYSTEM);
        assert!(SYSTEM > SERVICE);
        assert!(SERVICE > USER);
        assert!(USER > WORKER);
        assert!(WORKER > APPLICATION);
        assert!(APPLICATION > PUBLIC);
    }

    #[test]
    fn test_custom_table() {
        let table = RoleTable::with_weights([("admin", 90), ("guest", 1)]);
        assert_eq!(table.weight("admin"), Some(90));
        assert_eq!(table.weight("root"), None);
    }
}
