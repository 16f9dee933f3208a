use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::interview_dto::{
    CreateInterviewPayload, InterviewListQuery, InterviewRole, UpdateInterviewPayload,
};
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewStatus};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Connects debited from an interviewer once their bid wins and the
/// interview is scheduled.
const SCHEDULING_CONNECTS_COST: i32 = 100;

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        creator_id: Uuid,
        payload: CreateInterviewPayload,
    ) -> Result<Interview> {
        let interviewee: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM freelancers WHERE id = $1")
                .bind(payload.interviewee_id)
                .fetch_optional(&self.pool)
                .await?;
        if interviewee.is_none() {
            return Err(Error::NotFound("Interviewee not found".to_string()));
        }

        let sql = format!(
            "INSERT INTO interviews (creator_id, interviewee_id, interview_type, talent_type, \
             talent_id, interview_date, description, interviewee_date_time_agreement) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            Interview::COLUMNS
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(creator_id)
            .bind(payload.interviewee_id)
            .bind(payload.interview_type.as_str())
            .bind(payload.talent_type.as_str())
            .bind(payload.talent_id)
            .bind(payload.interview_date)
            .bind(payload.description)
            .bind(payload.interviewee_date_time_agreement)
            .fetch_one(&self.pool)
            .await?;

        Ok(interview)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Interview> {
        self.get_optional(id)
            .await?
            .ok_or_else(|| Error::NotFound("Interview not found".to_string()))
    }

    pub async fn get_optional(&self, id: Uuid) -> Result<Option<Interview>> {
        let sql = format!(
            "SELECT {} FROM interviews WHERE id = $1",
            Interview::COLUMNS
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(interview)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateInterviewPayload) -> Result<Interview> {
        self.get_by_id(id).await?;

        let sql = format!(
            "UPDATE interviews SET \
                interview_type = COALESCE($2, interview_type), \
                talent_type = COALESCE($3, talent_type), \
                talent_id = COALESCE($4, talent_id), \
                interview_date = COALESCE($5, interview_date), \
                description = COALESCE($6, description), \
                interviewee_date_time_agreement = COALESCE($7, interviewee_date_time_agreement), \
                status = COALESCE($8, status), \
                rating = COALESCE($9, rating), \
                comments = COALESCE($10, comments), \
                transaction = COALESCE($11, transaction), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {}",
            Interview::COLUMNS
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(id)
            .bind(payload.interview_type.map(|t| t.as_str()))
            .bind(payload.talent_type.map(|t| t.as_str()))
            .bind(payload.talent_id)
            .bind(payload.interview_date)
            .bind(payload.description)
            .bind(payload.interviewee_date_time_agreement)
            .bind(payload.status.map(|s| s.as_str()))
            .bind(payload.rating)
            .bind(payload.comments)
            .bind(payload.transaction.map(sqlx::types::Json))
            .fetch_one(&self.pool)
            .await?;

        // Scheduling an interview consumes connects from the winning
        // interviewer's balance.
        if payload.status == Some(InterviewStatus::Scheduled) {
            if let Some(interviewer_id) = interview.accepted_interviewer_id() {
                self.deduct_connects(interviewer_id).await?;
            }
        }

        Ok(interview)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Interview not found".to_string()));
        }
        Ok(())
    }

    /// Role-scoped fetch. Interviewer scope matches through the bid map: an
    /// interview belongs to interviewer X when some bid of theirs is on it,
    /// whether or not they were selected.
    pub async fn list_by_role(&self, role: InterviewRole, id: Uuid) -> Result<Vec<Interview>> {
        let sql = match role {
            InterviewRole::Interviewer => format!(
                "SELECT {} FROM interviews WHERE EXISTS ( \
                    SELECT 1 FROM jsonb_each(bids) AS b \
                    WHERE (b.value->>'interviewer_id')::uuid = $1) \
                 ORDER BY interview_date ASC",
                Interview::COLUMNS
            ),
            InterviewRole::Interviewee => format!(
                "SELECT {} FROM interviews WHERE interviewee_id = $1 ORDER BY interview_date ASC",
                Interview::COLUMNS
            ),
            InterviewRole::Creator => format!(
                "SELECT {} FROM interviews WHERE creator_id = $1 ORDER BY interview_date ASC",
                Interview::COLUMNS
            ),
        };
        let interviews = sqlx::query_as::<_, Interview>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(interviews)
    }

    /// Paginated listing of interviews still open for bidding. The status
    /// restriction sits in the WHERE clause, ahead of LIMIT/OFFSET.
    pub async fn list_all(&self, query: &InterviewListQuery) -> Result<Vec<Interview>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        // The interviewer_id filter ($3) is accepted but inert: BIDDING rows
        // never carry an interviewer_id, and selection moves the row out of
        // BIDDING. Kept so clients sending it get an empty page, not an error.
        let sql = format!(
            "SELECT {} FROM interviews \
             WHERE status = $1 \
               AND ($2::uuid IS NULL OR interviewee_id = $2) \
               AND ($3::uuid IS NULL OR interviewer_id = $3) \
               AND ($4::text IS NULL OR interview_type = $4) \
               AND ($5::text IS NULL OR talent_type = $5) \
               AND ($6::uuid IS NULL OR talent_id = $6) \
             ORDER BY interview_date ASC \
             LIMIT $7 OFFSET $8",
            Interview::COLUMNS
        );
        let interviews = sqlx::query_as::<_, Interview>(&sql)
            .bind(InterviewStatus::Bidding.as_str())
            .bind(query.interviewee_id)
            .bind(query.interviewer_id)
            .bind(query.interview_type.map(|t| t.as_str()))
            .bind(query.talent_type.map(|t| t.as_str()))
            .bind(query.talent_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(interviews)
    }

    pub async fn current_interviews(
        &self,
        role: InterviewRole,
        id: Uuid,
    ) -> Result<Vec<Interview>> {
        let now = Utc::now();
        let interviews = self.list_by_role(role, id).await?;
        Ok(interviews
            .into_iter()
            .filter(|interview| !interview.is_completed(now))
            .collect())
    }

    pub async fn completed_interviews(
        &self,
        role: InterviewRole,
        id: Uuid,
    ) -> Result<Vec<Interview>> {
        let now = Utc::now();
        let interviews = self.list_by_role(role, id).await?;
        Ok(interviews
            .into_iter()
            .filter(|interview| interview.is_completed(now))
            .collect())
    }

    pub async fn interviews_by_talent_ids(&self, talent_ids: &[Uuid]) -> Result<Vec<Interview>> {
        if talent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM interviews WHERE talent_id = ANY($1) ORDER BY interview_date ASC",
            Interview::COLUMNS
        );
        let interviews = sqlx::query_as::<_, Interview>(&sql)
            .bind(talent_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(interviews)
    }

    async fn deduct_connects(&self, interviewer_id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE freelancers SET connects = GREATEST(connects - $2, 0) WHERE id = $1",
        )
        .bind(interviewer_id)
        .bind(SCHEDULING_CONNECTS_COST)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
