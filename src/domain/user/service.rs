use std::sync::Arc;

use chrono::Utc;

use crate::infrastructure::repositories::UserRepository;

use super::error::UserServiceError;
use super::model::{User, UserSummary};

/// User ids double as cache directory names, so they are restricted to a
/// shape that is always a safe path segment.
const MAX_USER_ID_LENGTH: usize = 64;

pub struct UserService {
    repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new user. The first user added becomes the current one.
    pub fn add_user(
        &self,
        user_id: &str,
        voice_id: &str,
        name: &str,
    ) -> Result<User, UserServiceError> {
        validate_user_id(user_id)?;
        if voice_id.trim().is_empty() {
            return Err(UserServiceError::Invalid(
                "voice id cannot be empty".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(UserServiceError::Invalid(
                "display name cannot be empty".to_string(),
            ));
        }

        let mut registry = self.repo.load()?;
        if registry.users.contains_key(user_id) {
            return Err(UserServiceError::AlreadyExists(user_id.to_string()));
        }

        let user = User {
            voice_id: voice_id.trim().to_string(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        };
        registry.users.insert(user_id.to_string(), user.clone());
        if registry.current_user.is_none() {
            registry.current_user = Some(user_id.to_string());
        }
        self.repo.save(&registry)?;

        tracing::info!(user_id = user_id, name = %user.name, "User added");
        Ok(user)
    }

    /// Make an existing user the current one.
    pub fn switch_user(&self, user_id: &str) -> Result<User, UserServiceError> {
        let mut registry = self.repo.load()?;
        let user = registry
            .users
            .get(user_id)
            .cloned()
            .ok_or(UserServiceError::NotFound)?;
        registry.current_user = Some(user_id.to_string());
        self.repo.save(&registry)?;

        tracing::info!(user_id = user_id, "Switched current user");
        Ok(user)
    }

    /// The current user, if one is configured.
    pub fn current_user(&self) -> Result<Option<(String, User)>, UserServiceError> {
        let registry = self.repo.load()?;
        let Some(id) = registry.current_user else {
            return Ok(None);
        };
        Ok(registry.users.get(&id).cloned().map(|user| (id, user)))
    }

    /// All users in id order, with the current-user marker resolved.
    pub fn list_users(&self) -> Result<Vec<UserSummary>, UserServiceError> {
        let registry = self.repo.load()?;
        let current = registry.current_user.as_deref();
        Ok(registry
            .users
            .iter()
            .map(|(id, user)| UserSummary {
                id: id.clone(),
                name: user.name.clone(),
                is_current: Some(id.as_str()) == current,
            })
            .collect())
    }
}

fn validate_user_id(user_id: &str) -> Result<(), UserServiceError> {
    if user_id.is_empty() || user_id.len() > MAX_USER_ID_LENGTH {
        return Err(UserServiceError::Invalid(format!(
            "user id must be 1-{} characters",
            MAX_USER_ID_LENGTH
        )));
    }
    let safe = user_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if !safe {
        return Err(UserServiceError::Invalid(
            "user id may only contain a-z, 0-9, '_' and '-'".to_string(),
        ));
    }
    Ok(())
}
