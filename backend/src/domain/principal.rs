//! Principal types resolved from a verified bearer credential.
//!
//! The Ledger and Aggregation core never reads user records directly; it
//! trusts the `(id, role)` pair the identity service resolves and gates
//! operations on it.

use serde::{Deserialize, Serialize};

/// Surrogate integer identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw database identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role carried by a verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May submit, update, and delete their own feedback.
    Student,
    /// May read anonymized feedback and analytics.
    Admin,
}

impl Role {
    /// Stable string form, matching the `users.role` column values.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to interpret a stored role string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

/// Verified identity attached to a request after token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account the credential belongs to.
    pub user_id: UserId,
    /// Role the credential carries; trusted without re-derivation.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("student", Role::Student)]
    #[case("admin", Role::Admin)]
    fn role_round_trips_through_str(#[case] raw: &str, #[case] expected: Role) {
        let parsed: Role = raw.parse().expect("known role parses");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let result = "professor".parse::<Role>();
        assert_eq!(result, Err(RoleParseError("professor".to_owned())));
    }

    #[rstest]
    fn user_id_serializes_transparently() {
        let id = UserId::new(42);
        assert_eq!(
            serde_json::to_string(&id).expect("serialises"),
            "42".to_owned()
        );
    }
}
