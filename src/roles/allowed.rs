//! Role range matching
//!
//! [`check_role`] decides whether a numeric role weight is a member of an
//! allowed specification: an exact value, an ordered sequence of terms, or
//! a [`RoleRange`] expressing bound, anti-value, and range/anti-range
//! semantics.
//!
//! The predicate never errors. This is a deliberate fail-closed policy for
//! an access-control check: a malformed specification must degrade to
//! "no match", never to permissive behavior.

use serde::{Deserialize, Serialize};

/// Structured role comparison over `lt`/`lte`/`gt`/`gte`/`not` bounds.
///
/// All fields are optional; an empty range matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRange {
    /// Exclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<i64>,
    /// Exclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<i64>,
    /// Anti-value; when present every other field is ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<i64>,
}

/// One bound with its inclusivity, after normalization.
#[derive(Debug, Clone, Copy)]
struct Bound {
    value: i64,
    inclusive: bool,
}

impl Bound {
    fn admits_below(self, role: i64) -> bool {
        if self.inclusive {
            role <= self.value
        } else {
            role < self.value
        }
    }

    fn admits_above(self, role: i64) -> bool {
        if self.inclusive {
            role >= self.value
        } else {
            role > self.value
        }
    }
}

impl RoleRange {
    /// Matches any role except the given one.
    pub fn exclude(not: i64) -> Self {
        Self {
            not: Some(not),
            ..Self::default()
        }
    }

    /// Matches roles strictly above the bound.
    pub fn above(gt: i64) -> Self {
        Self {
            gt: Some(gt),
            ..Self::default()
        }
    }

    /// Matches roles at or above the bound.
    pub fn at_least(gte: i64) -> Self {
        Self {
            gte: Some(gte),
            ..Self::default()
        }
    }

    /// Matches roles strictly below the bound.
    pub fn below(lt: i64) -> Self {
        Self {
            lt: Some(lt),
            ..Self::default()
        }
    }

    /// Matches roles at or below the bound.
    pub fn at_most(lte: i64) -> Self {
        Self {
            lte: Some(lte),
            ..Self::default()
        }
    }

    /// Evaluates the range against a role weight.
    ///
    /// Rules, in priority order:
    /// 1. `not` present: `role != not`, everything else ignored
    /// 2. When both forms of a bound are given, the strict one wins
    /// 3. Single bound: that bound alone decides
    /// 4. Upper >= lower: inside-range, both bounds must hold
    /// 5. Upper < lower: outside-range (crossed), either bound suffices
    /// 6. No bounds at all: no match
    pub fn matches(&self, role: i64) -> bool {
        if let Some(not) = self.not {
            return role != not;
        }

        let upper = self
            .lt
            .map(|value| Bound {
                value,
                inclusive: false,
            })
            .or_else(|| {
                self.lte.map(|value| Bound {
                    value,
                    inclusive: true,
                })
            });
        let lower = self
            .gt
            .map(|value| Bound {
                value,
                inclusive: false,
            })
            .or_else(|| {
                self.gte.map(|value| Bound {
                    value,
                    inclusive: true,
                })
            });

        match (upper, lower) {
            (Some(upper), None) => upper.admits_below(role),
            (None, Some(lower)) => lower.admits_above(role),
            (Some(upper), Some(lower)) => {
                if upper.value >= lower.value {
                    upper.admits_below(role) && lower.admits_above(role)
                } else {
                    upper.admits_below(role) || lower.admits_above(role)
                }
            }
            (None, None) => false,
        }
    }
}

/// Specification of which role weights are allowed.
///
/// Untagged so configuration can author `20`, `{"gt": 19}`, or
/// `[12, {"lt": 10}]` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Allowed {
    /// Exact-match semantics
    Exact(i64),
    /// Structured range comparison
    Range(RoleRange),
    /// Ordered union; evaluated left to right, first match wins
    AnyOf(Vec<Allowed>),
}

impl Allowed {
    /// Evaluates the rule against a role weight.
    pub fn matches(&self, role: i64) -> bool {
        match self {
            Allowed::Exact(value) => role == *value,
            Allowed::Range(range) => range.matches(role),
            Allowed::AnyOf(terms) => terms.iter().any(|term| term.matches(role)),
        }
    }
}

impl From<i64> for Allowed {
    fn from(value: i64) -> Self {
        Allowed::Exact(value)
    }
}

impl From<RoleRange> for Allowed {
    fn from(range: RoleRange) -> Self {
        Allowed::Range(range)
    }
}

impl From<Vec<Allowed>> for Allowed {
    fn from(terms: Vec<Allowed>) -> Self {
        Allowed::AnyOf(terms)
    }
}

/// Decides whether a role weight satisfies an allowed specification.
///
/// Never errors; malformed specifications degrade to `false`.
pub fn check_role(role: i64, allowed: &Allowed) -> bool {
    allowed.matches(role)
}
