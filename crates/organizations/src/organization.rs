//! The organization entity (tenant boundary).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{DomainError, DomainResult, Entity, OrganizationId};

/// A tenant/business unit owning its own employees, roles and financial
/// settings.
///
/// Deleting an organization cascades to every scoped child record — that is
/// source behavior, orchestrated by the application layer across stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    /// Unique across the platform.
    pub name: String,
    /// Optional short code, unique when present.
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Soft-disable flag; disabled organizations keep their data.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl Organization {
    pub fn create(new: NewOrganization) -> DomainResult<Self> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("organization name cannot be empty"));
        }
        let code = match new.code {
            Some(code) => {
                let code = code.trim().to_string();
                if code.is_empty() {
                    return Err(DomainError::validation("organization code cannot be blank"));
                }
                Some(code)
            }
            None => None,
        };
        let now = Utc::now();
        Ok(Self {
            id: OrganizationId::new(),
            name,
            code,
            address: new.address,
            phone_number: new.phone_number,
            email: new.email,
            website: new.website,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("organization name cannot be empty"));
        }
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for Organization {
    type Id = OrganizationId;

    fn id(&self) -> OrganizationId {
        self.id
    }
}

impl core::fmt::Display for Organization {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
