use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::bid_dto::{CreateBidPayload, UpdateBidPayload};
use crate::error::{Error, Result};
use crate::models::interview::{Bid, Interview};

/// Bid lifecycle against the embedded bid map. Every mutation is a single
/// jsonb point update on the interview row, so concurrent writers never
/// rewrite each other's entries.
#[derive(Clone)]
pub struct BidService {
    pool: PgPool,
    max_bids_per_interview: i64,
}

impl BidService {
    pub fn new(pool: PgPool, max_bids_per_interview: i64) -> Self {
        Self {
            pool,
            max_bids_per_interview,
        }
    }

    pub async fn create_bid(&self, interview_id: Uuid, payload: CreateBidPayload) -> Result<Bid> {
        let interviewer: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM freelancers WHERE id = $1")
                .bind(payload.interviewer_id)
                .fetch_optional(&self.pool)
                .await?;
        if interviewer.is_none() {
            return Err(Error::NotFound("Interviewer not found".to_string()));
        }

        let bid = payload.into_bid();
        let result = sqlx::query(
            "UPDATE interviews \
             SET bids = jsonb_set(bids, ARRAY[$2::text], $3::jsonb), updated_at = NOW() \
             WHERE id = $1 \
               AND (SELECT COUNT(*) FROM jsonb_object_keys(bids)) < $4",
        )
        .bind(interview_id)
        .bind(bid.id.to_string())
        .bind(Json(&bid))
        .bind(self.max_bids_per_interview)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if self.interview_exists(interview_id).await? {
                return Err(Error::BadRequest(format!(
                    "Interview already has the maximum of {} bids",
                    self.max_bids_per_interview
                )));
            }
            return Err(Error::NotFound("Interview not found".to_string()));
        }

        Ok(bid)
    }

    pub async fn get_bid(&self, interview_id: Uuid, bid_id: Uuid) -> Result<Bid> {
        let entry: Option<Option<Json<Bid>>> =
            sqlx::query_scalar("SELECT bids->$2::text FROM interviews WHERE id = $1")
                .bind(interview_id)
                .bind(bid_id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        match entry {
            None => Err(Error::NotFound("Interview not found".to_string())),
            Some(None) => Err(Error::NotFound("Interview bid not found".to_string())),
            Some(Some(Json(bid))) => Ok(bid),
        }
    }

    pub async fn update_bid(
        &self,
        interview_id: Uuid,
        bid_id: Uuid,
        payload: UpdateBidPayload,
    ) -> Result<Bid> {
        let patch = payload.to_patch()?;
        // `bids ? key` guards the entry so an update never creates a bid.
        let updated: Option<Json<Bid>> = sqlx::query_scalar(
            "UPDATE interviews \
             SET bids = jsonb_set(bids, ARRAY[$2::text], (bids->$2::text) || $3::jsonb), \
                 updated_at = NOW() \
             WHERE id = $1 AND bids ? $2::text \
             RETURNING bids->$2::text",
        )
        .bind(interview_id)
        .bind(bid_id.to_string())
        .bind(&patch)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(Json(bid)) => Ok(bid),
            None => {
                if self.interview_exists(interview_id).await? {
                    Err(Error::NotFound("Interview bid not found".to_string()))
                } else {
                    Err(Error::NotFound("Interview not found".to_string()))
                }
            }
        }
    }

    /// Removes the map entry. Deleting an already-absent bid is a no-op, and
    /// a previously selected bid's removal leaves `interviewer_id` intact:
    /// selection is a fact about the interview, not the bid record.
    pub async fn delete_bid(&self, interview_id: Uuid, bid_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE interviews SET bids = bids - $2::text, updated_at = NOW() WHERE id = $1",
        )
        .bind(interview_id)
        .bind(bid_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Interview not found".to_string()));
        }
        Ok(())
    }

    /// Commits the selection in one atomic statement: binds the bid's
    /// interviewer to the interview, promotes that bid to ACCEPTED, demotes
    /// any previously accepted bid back to PENDING and moves the interview to
    /// SCHEDULED. Concurrent selections serialize on the row; the last one
    /// wins consistently. Losing bids keep their status.
    pub async fn select_bid(&self, interview_id: Uuid, bid_id: Uuid) -> Result<Interview> {
        let sql = format!(
            "UPDATE interviews \
             SET interviewer_id = (bids #>> ARRAY[$2::text, 'interviewer_id'])::uuid, \
                 status = 'SCHEDULED', \
                 bids = ( \
                     SELECT COALESCE(jsonb_object_agg( \
                         key, \
                         CASE \
                             WHEN key = $2::text \
                                 THEN value || '{{\"status\": \"ACCEPTED\"}}'::jsonb \
                             WHEN value->>'status' = 'ACCEPTED' \
                                 THEN value || '{{\"status\": \"PENDING\"}}'::jsonb \
                             ELSE value \
                         END), '{{}}'::jsonb) \
                     FROM jsonb_each(bids)), \
                 updated_at = NOW() \
             WHERE id = $1 AND bids ? $2::text \
             RETURNING {}",
            Interview::COLUMNS
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(interview_id)
            .bind(bid_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match interview {
            Some(interview) => Ok(interview),
            None => {
                if self.interview_exists(interview_id).await? {
                    Err(Error::NotFound("Interview bid not found".to_string()))
                } else {
                    Err(Error::NotFound("Interview not found".to_string()))
                }
            }
        }
    }

    /// Interviews carrying at least one bid from this interviewer.
    pub async fn bids_by_interviewer(&self, interviewer_id: Uuid) -> Result<Vec<Interview>> {
        let sql = format!(
            "SELECT {} FROM interviews WHERE EXISTS ( \
                SELECT 1 FROM jsonb_each(bids) AS b \
                WHERE (b.value->>'interviewer_id')::uuid = $1) \
             ORDER BY interview_date ASC",
            Interview::COLUMNS
        );
        let interviews = sqlx::query_as::<_, Interview>(&sql)
            .bind(interviewer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(interviews)
    }

    async fn interview_exists(&self, interview_id: Uuid) -> Result<bool> {
        let id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM interviews WHERE id = $1")
            .bind(interview_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id.is_some())
    }
}
