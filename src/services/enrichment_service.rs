use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::bid_dto::BidView;
use crate::dto::interview_dto::InterviewView;
use crate::error::{Error, Result};
use crate::models::freelancer::{Freelancer, FreelancerInfo, TalentInfo};
use crate::models::interview::{Interview, TalentType};

/// Read-side resolver joining interviews and bids to the freelancer and
/// talent directories. Produces ephemeral views and never writes; a missing
/// directory entry degrades the view instead of failing the request.
#[derive(Clone)]
pub struct EnrichmentService {
    pool: PgPool,
}

impl EnrichmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinct interviewer ids referenced by any bid across the batch.
    pub fn extract_interviewer_ids(interviews: &[Interview]) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = interviews
            .iter()
            .flat_map(|interview| interview.bids.0.values())
            .map(|bid| bid.interviewer_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// One batched directory lookup; ids without a match are simply absent
    /// from the map.
    pub async fn freelancer_info(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, FreelancerInfo>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, FreelancerInfo>(
            "SELECT f.id, f.user_name, f.work_experience, \
                    COALESCE(ARRAY_AGG(DISTINCT s.label) \
                        FILTER (WHERE s.label IS NOT NULL), '{}') AS skills \
             FROM freelancers f \
             LEFT JOIN freelancer_skills fs ON fs.freelancer_id = f.id \
             LEFT JOIN skills s ON s.id = fs.skill_id \
             WHERE f.id = ANY($1) \
             GROUP BY f.id, f.user_name, f.work_experience",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|info| (info.id, info)).collect())
    }

    /// Dispatches on the discriminator to the skill or domain directory.
    /// A deleted talent resolves to None, which is a valid outcome.
    pub async fn talent_info(
        &self,
        talent_id: Uuid,
        talent_type: &str,
    ) -> Result<Option<TalentInfo>> {
        let sql = if talent_type == TalentType::Skill.as_str() {
            "SELECT label FROM skills WHERE id = $1"
        } else if talent_type == TalentType::Domain.as_str() {
            "SELECT label FROM domains WHERE id = $1"
        } else {
            return Ok(None);
        };

        let label: Option<String> = sqlx::query_scalar(sql)
            .bind(talent_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(label.map(|label| TalentInfo {
            id: talent_id,
            label,
            talent_type: talent_type.to_string(),
        }))
    }

    /// Builds the response view for one interview, attaching interviewer
    /// snapshots to its bids. Pure; missing snapshots leave the field unset.
    pub fn attach_details(
        interview: Interview,
        talent: Option<TalentInfo>,
        freelancers: &HashMap<Uuid, FreelancerInfo>,
    ) -> InterviewView {
        let mut bids: Vec<BidView> = interview
            .bids
            .0
            .into_values()
            .map(|bid| {
                let interviewer = freelancers.get(&bid.interviewer_id).cloned();
                BidView { bid, interviewer }
            })
            .collect();
        bids.sort_by_key(|view| view.bid.suggested_date_time);

        InterviewView {
            id: interview.id,
            creator_id: interview.creator_id,
            interviewee_id: interview.interviewee_id,
            interviewer_id: interview.interviewer_id,
            interview_type: interview.interview_type,
            talent_type: interview.talent_type,
            talent_id: interview.talent_id,
            talent,
            interview_date: interview.interview_date,
            description: interview.description,
            interviewee_date_time_agreement: interview.interviewee_date_time_agreement,
            status: interview.status,
            bids,
            rating: interview.rating,
            comments: interview.comments,
            transaction: interview.transaction.map(|t| t.0),
        }
    }

    /// Full read-path enrichment for a batch of interviews.
    pub async fn enrich(&self, interviews: Vec<Interview>) -> Result<Vec<InterviewView>> {
        let interviewer_ids = Self::extract_interviewer_ids(&interviews);
        let freelancers = self.freelancer_info(&interviewer_ids).await?;

        let mut views = Vec::with_capacity(interviews.len());
        for interview in interviews {
            let talent = self
                .talent_info(interview.talent_id, &interview.talent_type)
                .await?;
            views.push(Self::attach_details(interview, talent, &freelancers));
        }
        Ok(views)
    }

    /// Freelancers verified and active as interviewers for the given talent.
    pub async fn interviewers_by_talent(&self, talent_id: Uuid) -> Result<Vec<Freelancer>> {
        let interviewers = sqlx::query_as::<_, Freelancer>(
            "SELECT f.id, f.user_name, f.work_experience, f.connects, f.created_at \
             FROM freelancers f \
             JOIN interviewer_talents it ON it.freelancer_id = f.id \
             WHERE it.talent_id = $1 AND it.status = 'VERIFIED' AND it.is_active \
             ORDER BY f.user_name ASC",
        )
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interviewers)
    }

    /// Talent ids the interviewer is verified for. The freelancer must
    /// exist; having no verified talents is an empty result, not an error.
    pub async fn verified_talent_ids(&self, interviewer_id: Uuid) -> Result<Vec<Uuid>> {
        let freelancer: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM freelancers WHERE id = $1")
                .bind(interviewer_id)
                .fetch_optional(&self.pool)
                .await?;
        if freelancer.is_none() {
            return Err(Error::NotFound("Freelancer not found".to_string()));
        }

        let talent_ids = sqlx::query_scalar(
            "SELECT talent_id FROM interviewer_talents \
             WHERE freelancer_id = $1 AND status = 'VERIFIED' AND is_active",
        )
        .bind(interviewer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(talent_ids)
    }
}
