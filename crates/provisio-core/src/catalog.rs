//! Department/access catalog.
//!
//! Static configuration mapping a department name to the groups,
//! permissions, and organizational unit its members receive. The
//! catalog is the single source of truth for access derivation: the
//! directory store re-derives these fields on every mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::user::UserStatus;

/// OU assigned when a department is not present in the catalog.
pub const DEFAULT_ORGANIZATIONAL_UNIT: &str = "OU=Users,DC=company,DC=com";

/// Access configuration for one department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentAccess {
    pub groups: Vec<String>,
    pub permissions: Vec<String>,
    pub organizational_unit: String,
}

/// Derived access fields for a user, after applying the status rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccess {
    pub organizational_unit: String,
    pub groups: Vec<String>,
    pub permissions: Vec<String>,
}

/// Department name → access configuration.
///
/// Iteration order is deterministic (`BTreeMap`) so derived group and
/// permission lists are stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCatalog {
    departments: BTreeMap<String, DepartmentAccess>,
}

impl DepartmentCatalog {
    pub fn new(departments: BTreeMap<String, DepartmentAccess>) -> Self {
        Self { departments }
    }

    pub fn contains(&self, department: &str) -> bool {
        self.departments.contains_key(department)
    }

    pub fn access(&self, department: &str) -> Option<&DepartmentAccess> {
        self.departments.get(department)
    }

    /// Department names, in catalog order.
    pub fn department_names(&self) -> impl Iterator<Item = &str> {
        self.departments.keys().map(String::as_str)
    }

    /// Derive the access fields for a department under a given status.
    ///
    /// Active users get exactly the catalog's groups and permissions;
    /// inactive users get empty lists regardless of department. The
    /// organizational unit always follows the department, falling back
    /// to [`DEFAULT_ORGANIZATIONAL_UNIT`] when unrecognized.
    pub fn resolve(&self, department: &str, status: UserStatus) -> ResolvedAccess {
        let organizational_unit = self
            .departments
            .get(department)
            .map(|a| a.organizational_unit.clone())
            .unwrap_or_else(|| DEFAULT_ORGANIZATIONAL_UNIT.to_string());

        match (status, self.departments.get(department)) {
            (UserStatus::Active, Some(access)) => ResolvedAccess {
                organizational_unit,
                groups: access.groups.clone(),
                permissions: access.permissions.clone(),
            },
            _ => ResolvedAccess {
                organizational_unit,
                groups: Vec::new(),
                permissions: Vec::new(),
            },
        }
    }
}

impl Default for DepartmentCatalog {
    /// The built-in company catalog.
    fn default() -> Self {
        fn entry(
            groups: &[&str],
            permissions: &[&str],
            organizational_unit: &str,
        ) -> DepartmentAccess {
            DepartmentAccess {
                groups: groups.iter().map(|s| s.to_string()).collect(),
                permissions: permissions.iter().map(|s| s.to_string()).collect(),
                organizational_unit: organizational_unit.to_string(),
            }
        }

        let mut departments = BTreeMap::new();
        departments.insert(
            "Finance".to_string(),
            entry(
                &["finance_full"],
                &["read_ledger", "post_journal", "view_reports"],
                "OU=Finance,OU=Users,DC=company,DC=com",
            ),
        );
        departments.insert(
            "HR".to_string(),
            entry(
                &["hr_portal"],
                &["view_hr_portal", "create_tickets"],
                "OU=HR,OU=Users,DC=company,DC=com",
            ),
        );
        departments.insert(
            "Marketing".to_string(),
            entry(
                &["mkt_basic"],
                &["view_campaigns"],
                "OU=Marketing,OU=Users,DC=company,DC=com",
            ),
        );
        departments.insert(
            "IT".to_string(),
            entry(
                &["it_engineers"],
                &["admin_console", "deploy_access"],
                "OU=IT,OU=Users,DC=company,DC=com",
            ),
        );
        departments.insert(
            "Intern".to_string(),
            entry(
                &["limited_access"],
                &["read_only"],
                "OU=Interns,OU=Users,DC=company,DC=com",
            ),
        );
        Self { departments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_five_departments() {
        let catalog = DepartmentCatalog::default();
        assert_eq!(catalog.department_names().count(), 5);
        assert!(catalog.contains("Finance"));
        assert!(catalog.contains("Intern"));
        assert!(!catalog.contains("Sales"));
    }

    #[test]
    fn resolve_active_uses_catalog_values() {
        let catalog = DepartmentCatalog::default();
        let access = catalog.resolve("Finance", UserStatus::Active);
        assert_eq!(access.groups, vec!["finance_full"]);
        assert_eq!(
            access.permissions,
            vec!["read_ledger", "post_journal", "view_reports"]
        );
        assert_eq!(
            access.organizational_unit,
            "OU=Finance,OU=Users,DC=company,DC=com"
        );
    }

    #[test]
    fn resolve_inactive_clears_access_but_keeps_ou() {
        let catalog = DepartmentCatalog::default();
        let access = catalog.resolve("IT", UserStatus::Inactive);
        assert!(access.groups.is_empty());
        assert!(access.permissions.is_empty());
        assert_eq!(access.organizational_unit, "OU=IT,OU=Users,DC=company,DC=com");
    }

    #[test]
    fn resolve_unknown_department_falls_back_to_default_ou() {
        let catalog = DepartmentCatalog::default();
        let access = catalog.resolve("Sales", UserStatus::Active);
        assert_eq!(access.organizational_unit, DEFAULT_ORGANIZATIONAL_UNIT);
        assert!(access.groups.is_empty());
        assert!(access.permissions.is_empty());
    }
}
