use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person the assistant speaks for: their provider voice plus a display
/// name for the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub voice_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// On-disk shape of the user registry (`users.json`).
///
/// A `BTreeMap` keeps listings in stable id order across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRegistry {
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    #[serde(default)]
    pub current_user: Option<String>,
}

/// One row of a user listing, with the current-user marker resolved.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub is_current: bool,
}
