// src/auth.rs
//
// Tenant guard
//
// Identity is issued elsewhere and handed to every action explicitly.
// Repositories only accept a resolved `OwnerId`, so an unscoped query cannot be written.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::OwnerId;
use crate::error::{AppError, AppResult};

/// Identity of whoever invoked an action, if the session resolved one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Caller(Option<OwnerId>);

impl Caller {
    pub fn authenticated(owner: OwnerId) -> Self {
        Self(Some(owner))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    /// Resolve the owner every store query will be scoped to
    pub fn require_owner(&self) -> AppResult<OwnerId> {
        self.0.ok_or(AppError::Unauthenticated)
    }
}

impl From<Option<OwnerId>> for Caller {
    fn from(owner: Option<OwnerId>) -> Self {
        Self(owner)
    }
}

impl From<OwnerId> for Caller {
    fn from(owner: OwnerId) -> Self {
        Self(Some(owner))
    }
}

impl From<Uuid> for Caller {
    fn from(id: Uuid) -> Self {
        Self(Some(OwnerId::new(id)))
    }
}
