//! User entity model and DTOs.

use cinetrack_core::error::{CoreError, CoreResult};
use cinetrack_core::types::{Date, DbId};
use cinetrack_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub login: String,
    /// Display name; falls back to `login` when the caller leaves it blank.
    pub name: String,
    pub birthday: Date,
}

/// DTO for creating a new user. Carries no id; the store assigns one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: Date,
}

impl CreateUser {
    /// Structural checks plus the domain date/login rules.
    pub fn validate_payload(&self) -> CoreResult<()> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validation::check_login(&self.login)?;
        validation::check_birthday(self.birthday)
    }

    /// Display name, defaulting to the login when absent or blank.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self.login.clone(),
        }
    }
}

/// DTO for a full-replace update. The id must reference an existing user.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub id: DbId,
    #[serde(flatten)]
    pub user: CreateUser,
}
