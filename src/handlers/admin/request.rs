//! Admin request DTOs

use jurybox_rules::{Role, RoleSet};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    utils::PageQuery,
};

/// `?role=jury&page=2&per_page=50`
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl UserListQuery {
    pub fn role(&self) -> AppResult<Option<Role>> {
        self.role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(|r| r.parse::<Role>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    pub fn page(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Replace a user's roles
#[derive(Debug, Deserialize)]
pub struct UpdateRolesRequest {
    pub roles: Vec<String>,
}

impl UpdateRolesRequest {
    pub fn role_set(&self) -> AppResult<RoleSet> {
        RoleSet::parse(&self.roles).map_err(|e| AppError::Validation(e.to_string()))
    }
}
