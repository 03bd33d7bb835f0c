//! Moderator authorization roles.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a recognized role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Role must be either \"admin\" or \"moderator\"")]
pub struct RoleParseError;

/// Authorization role carried by a moderator document.
///
/// The role lookup endpoint resolves a uid to one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to store management.
    Admin,
    /// Content moderation access only.
    Moderator,
}

impl Role {
    /// Returns the lowercase wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            _ => Err(RoleParseError),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_valid() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("moderator".parse::<Role>().unwrap(), Role::Moderator);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("superadmin".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Moderator.to_string(), "moderator");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Role::Moderator).unwrap();
        assert_eq!(json, "\"moderator\"");

        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Moderator);
    }

    #[test]
    fn test_parse_error_message() {
        let err = "viewer".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "Role must be either \"admin\" or \"moderator\"");
    }
}
