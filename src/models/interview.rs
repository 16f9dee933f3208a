use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Interview aggregate. Bids live inside the row as a JSONB map keyed by bid
/// id, so a single bid can be touched without rewriting the whole set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub interviewee_id: Uuid,
    /// Set if and only if a bid has been selected.
    pub interviewer_id: Option<Uuid>,
    pub interview_type: String,
    pub talent_type: String,
    pub talent_id: Uuid,
    pub interview_date: DateTime<Utc>,
    pub description: Option<String>,
    pub interviewee_date_time_agreement: bool,
    pub status: String,
    pub bids: Json<HashMap<Uuid, Bid>>,
    pub rating: Option<f64>,
    pub comments: Option<String>,
    pub transaction: Option<Json<TransactionRef>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Interview {
    pub const COLUMNS: &'static str = "id, creator_id, interviewee_id, interviewer_id, \
        interview_type, talent_type, talent_id, interview_date, description, \
        interviewee_date_time_agreement, status, bids, rating, comments, transaction, \
        created_at, updated_at";

    /// An interview counts as completed once it reaches a terminal status or
    /// its scheduled date has elapsed; everything else is current.
    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.status == InterviewStatus::Completed.as_str() || self.interview_date <= now
    }

    pub fn accepted_interviewer_id(&self) -> Option<Uuid> {
        self.bids
            .0
            .values()
            .find(|bid| bid.status == BidStatus::Accepted)
            .map(|bid| bid.interviewer_id)
    }
}

/// An interviewer's proposed terms for conducting an interview. Owned by its
/// parent interview; the id is unique within that interview only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: Uuid,
    pub interviewer_id: Uuid,
    pub date_time_agreement: bool,
    pub suggested_date_time: DateTime<Utc>,
    pub fee: String,
    #[serde(default)]
    pub status: BidStatus,
}

/// Opaque settlement reference; the payment ledger owns its meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRef {
    pub transaction_id: String,
    pub status: String,
    pub fee: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterviewStatus {
    Bidding,
    Scheduled,
    Ongoing,
    Completed,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bidding => "BIDDING",
            Self::Scheduled => "SCHEDULED",
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterviewType {
    Business,
    Interviewer,
    Talent,
    Growth,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "BUSINESS",
            Self::Interviewer => "INTERVIEWER",
            Self::Talent => "TALENT",
            Self::Growth => "GROWTH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TalentType {
    Skill,
    Domain,
}

impl TalentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "SKILL",
            Self::Domain => "DOMAIN",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BidStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }
}
