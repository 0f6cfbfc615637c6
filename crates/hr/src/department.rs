//! Departments within an organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{DepartmentId, DomainError, DomainResult, Entity, OrganizationId};

/// A department, named uniquely within its organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    pub organization_id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
}

impl Department {
    pub fn create(new: NewDepartment) -> DomainResult<Self> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("department name cannot be empty"));
        }
        let now = Utc::now();
        Ok(Self {
            id: DepartmentId::new(),
            organization_id: new.organization_id,
            name,
            description: new.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("department name cannot be empty"));
        }
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for Department {
    type Id = DepartmentId;

    fn id(&self) -> DepartmentId {
        self.id
    }
}
