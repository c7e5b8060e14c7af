//! Character note entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text note attached to a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub character_id: i64,
    pub character_name: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
