use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored reference clip, reusable as speaker audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AudioExample {
    pub id: i64,
    pub description: String,
    pub filename: String,
    pub language: String,
}
