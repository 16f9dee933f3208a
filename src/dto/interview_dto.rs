use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::bid_dto::BidView;
use crate::error::{Error, Result};
use crate::models::freelancer::TalentInfo;
use crate::models::interview::{InterviewStatus, InterviewType, TalentType, TransactionRef};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInterviewPayload {
    pub interviewee_id: Uuid,
    pub interview_type: InterviewType,
    pub talent_type: TalentType,
    pub talent_id: Uuid,
    pub interview_date: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(default)]
    pub interviewee_date_time_agreement: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateInterviewPayload {
    pub interview_type: Option<InterviewType>,
    pub talent_type: Option<TalentType>,
    pub talent_id: Option<Uuid>,
    pub interview_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub interviewee_date_time_agreement: Option<bool>,
    pub status: Option<InterviewStatus>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    pub comments: Option<String>,
    pub transaction: Option<TransactionRef>,
}

/// Filters for the paginated listing. Only BIDDING interviews are eligible;
/// the status restriction is applied before pagination so pages come back
/// full.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewListQuery {
    pub interviewee_id: Option<Uuid>,
    pub interviewer_id: Option<Uuid>,
    pub interview_type: Option<InterviewType>,
    pub talent_type: Option<TalentType>,
    pub talent_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewRole {
    Interviewer,
    Interviewee,
    Creator,
}

/// Role-scoped query for the current/completed endpoints. When several role
/// ids are supplied the interviewer wins over the interviewee, who wins over
/// the creator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleQuery {
    pub interviewer_id: Option<Uuid>,
    pub interviewee_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
}

impl RoleQuery {
    pub fn resolve(&self) -> Result<(InterviewRole, Uuid)> {
        if let Some(id) = self.interviewer_id {
            Ok((InterviewRole::Interviewer, id))
        } else if let Some(id) = self.interviewee_id {
            Ok((InterviewRole::Interviewee, id))
        } else if let Some(id) = self.creator_id {
            Ok((InterviewRole::Creator, id))
        } else {
            Err(Error::BadRequest(
                "One of interviewerId, intervieweeId or creatorId is required".to_string(),
            ))
        }
    }
}

/// Read-only enriched projection of an interview. Built per request, never
/// written back.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewView {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub interviewee_id: Uuid,
    pub interviewer_id: Option<Uuid>,
    pub interview_type: String,
    pub talent_type: String,
    pub talent_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talent: Option<TalentInfo>,
    pub interview_date: DateTime<Utc>,
    pub description: Option<String>,
    pub interviewee_date_time_agreement: bool,
    pub status: String,
    pub bids: Vec<BidView>,
    pub rating: Option<f64>,
    pub comments: Option<String>,
    pub transaction: Option<TransactionRef>,
}

/// Current interviews grouped the way the dashboard consumes them: talent
/// verifications on one side, project interviews on the other.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentInterviewsResponse {
    pub talent: Vec<InterviewView>,
    pub projects: Vec<InterviewView>,
}

impl CurrentInterviewsResponse {
    pub fn group(views: Vec<InterviewView>) -> Self {
        let (talent, projects) = views
            .into_iter()
            .filter(|view| {
                view.interview_type == InterviewType::Talent.as_str()
                    || view.interview_type == InterviewType::Business.as_str()
            })
            .partition(|view| view.interview_type == InterviewType::Talent.as_str());
        Self { talent, projects }
    }
}
