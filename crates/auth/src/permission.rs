//! Permission identifiers.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings in the platform convention
/// `"<app>.<action>_<entity>"` (e.g. `"hr.change_department"`). The
/// authorization core does no interpretation beyond set membership; the
/// constructors below only exist so call sites don't hand-format the strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// `"<app>.add_<entity>"`
    pub fn add(app: &str, entity: &str) -> Self {
        Self(Cow::Owned(format!("{app}.add_{entity}")))
    }

    /// `"<app>.change_<entity>"`
    pub fn change(app: &str, entity: &str) -> Self {
        Self(Cow::Owned(format!("{app}.change_{entity}")))
    }

    /// `"<app>.delete_<entity>"`
    pub fn delete(app: &str, entity: &str) -> Self {
        Self(Cow::Owned(format!("{app}.delete_{entity}")))
    }

    /// `"<app>.view_<entity>"`
    pub fn view(app: &str, entity: &str) -> Self {
        Self(Cow::Owned(format!("{app}.view_{entity}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}
