use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::freelancer::FreelancerInfo;
use crate::models::interview::{Bid, BidStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBidPayload {
    pub interviewer_id: Uuid,
    #[serde(default)]
    pub date_time_agreement: bool,
    pub suggested_date_time: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub fee: String,
}

impl CreateBidPayload {
    pub fn into_bid(self) -> Bid {
        Bid {
            id: Uuid::new_v4(),
            interviewer_id: self.interviewer_id,
            date_time_agreement: self.date_time_agreement,
            suggested_date_time: self.suggested_date_time,
            fee: self.fee,
            status: BidStatus::Pending,
        }
    }
}

/// Status is deliberately not part of this payload: a bid only leaves
/// PENDING through selection, which rewrites every entry in one statement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateBidPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_agreement: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub fee: Option<String>,
}

impl UpdateBidPayload {
    /// JSON object holding only the supplied fields, merged onto the stored
    /// bid entry with the `||` jsonb operator.
    pub fn to_patch(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Bid plus the interviewer snapshot resolved on the read path. The snapshot
/// is absent when the freelancer record no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct BidView {
    #[serde(flatten)]
    pub bid: Bid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<FreelancerInfo>,
}
