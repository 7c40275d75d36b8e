// Caller Identity & Roles

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// User ID (numeric, assigned by the identity system upstream)
pub type UserId = i64;

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Translator,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Capability check for the unfiltered job listing
    pub fn can_list_all_jobs(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// Admins may act on jobs they do not own
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Translator => write!(f, "translator"),
            Role::Admin => write!(f, "admin"),
            Role::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "translator" => Ok(Role::Translator),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// Identity of the caller, passed explicitly into every service call.
///
/// There is no ambient request context; whoever invokes the service must
/// say who is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn admin_roles_can_list_all_jobs() {
        assert!(Role::Admin.can_list_all_jobs());
        assert!(Role::SuperAdmin.can_list_all_jobs());
        assert!(!Role::Customer.can_list_all_jobs());
        assert!(!Role::Translator.can_list_all_jobs());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Customer, Role::Translator, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(Role::from_str("root").is_err());
    }
}
