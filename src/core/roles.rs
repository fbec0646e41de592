//! User roles
//!
//! Roles come from the backend as plain strings (`"ADMIN"`, `"TEACHER"`,
//! `"STUDENT"`). They are parsed into a closed enum at the boundary so the
//! rest of the application never compares free-form strings.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Permission bucket assigned to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Every known role
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    /// Name used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role name not in the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Ordered set of roles held by a user or allowed by a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// True if at least one role is shared
    pub fn intersects(&self, other: &RoleSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// True if every role of `other` is held
    pub fn is_superset(&self, other: &RoleSet) -> bool {
        self.0.is_superset(&other.0)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    /// Unknown role names are skipped so a backend that grows a new role
    /// does not make every profile unreadable.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(names
            .iter()
            .filter_map(|name| match name.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!("Ignoring role from backend: {}", err);
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("teacher".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!(" Student ".parse::<Role>(), Ok(Role::Student));
        assert_eq!(
            "PRINCIPAL".parse::<Role>(),
            Err(UnknownRole("PRINCIPAL".to_string()))
        );
    }

    #[test]
    fn test_role_display_matches_backend_name() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_set_serializes_as_list() {
        let roles = RoleSet::from([Role::Teacher, Role::Admin]);
        let json = serde_json::to_string(&roles).unwrap();

        // BTreeSet order follows declaration order
        assert_eq!(json, r#"["ADMIN","TEACHER"]"#);
    }

    #[test]
    fn test_role_set_skips_unknown_names() {
        let roles: RoleSet = serde_json::from_str(r#"["TEACHER","JANITOR","STUDENT"]"#).unwrap();

        assert_eq!(roles, RoleSet::from([Role::Teacher, Role::Student]));
    }

    #[test]
    fn test_role_set_null_is_empty() {
        let roles: RoleSet = serde_json::from_str("null").unwrap();
        assert!(roles.is_empty());
    }

    #[test]
    fn test_role_set_deduplicates() {
        let roles: RoleSet = serde_json::from_str(r#"["ADMIN","ADMIN"]"#).unwrap();
        assert_eq!(roles.len(), 1);
    }

    #[test]
    fn test_intersects_and_superset() {
        let held = RoleSet::from([Role::Teacher]);
        let allowed = RoleSet::from([Role::Admin, Role::Teacher]);

        assert!(held.intersects(&allowed));
        assert!(!held.is_superset(&allowed));
        assert!(RoleSet::from(Role::ALL).is_superset(&allowed));
        assert!(!RoleSet::new().intersects(&allowed));
    }
}
