use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row in the external freelancer directory. This service only reads it,
/// except for the connects deduction when an interview gets scheduled.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Freelancer {
    pub id: Uuid,
    pub user_name: String,
    pub work_experience: Option<i32>,
    pub connects: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Ephemeral interviewer snapshot attached to bids on the read path. Never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FreelancerInfo {
    pub id: Uuid,
    pub user_name: String,
    pub skills: Vec<String>,
    pub work_experience: Option<i32>,
}

/// Resolved skill or domain reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentInfo {
    pub id: Uuid,
    pub label: String,
    #[serde(rename = "type")]
    pub talent_type: String,
}
