//! Job titles, organization-scoped or shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrpay_core::{DomainError, DomainResult, Entity, JobTitleId, OrganizationId};

/// A job title. `organization_id == None` means the title is shared across
/// all organizations and shows up in every scoped listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitle {
    pub id: JobTitleId,
    pub organization_id: Option<OrganizationId>,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobTitle {
    pub organization_id: Option<OrganizationId>,
    pub title: String,
    pub description: Option<String>,
}

impl JobTitle {
    pub fn create(new: NewJobTitle) -> DomainResult<Self> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("job title cannot be empty"));
        }
        let now = Utc::now();
        Ok(Self {
            id: JobTitleId::new(),
            organization_id: new.organization_id,
            title,
            description: new.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Shared titles are visible regardless of the requesting scope.
    pub fn is_shared(&self) -> bool {
        self.organization_id.is_none()
    }
}

impl Entity for JobTitle {
    type Id = JobTitleId;

    fn id(&self) -> JobTitleId {
        self.id
    }
}
