use serde::{Deserialize, Serialize};

/// Closed set of privilege tiers. Newly created users default to `Customer`;
/// only a privileged promotion assigns `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" | "Admin" => Role::Admin,
            _ => Role::Customer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strings_default_to_customer() {
        assert_eq!(Role::from_str("admin"), Role::Admin);
        assert_eq!(Role::from_str("customer"), Role::Customer);
        assert_eq!(Role::from_str("superuser"), Role::Customer);
        assert_eq!(Role::from_str(""), Role::Customer);
    }
}
