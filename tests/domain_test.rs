use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use sqlx::types::Json;
use uuid::Uuid;

use interview_backend::dto::bid_dto::UpdateBidPayload;
use interview_backend::dto::interview_dto::{CurrentInterviewsResponse, InterviewRole, RoleQuery};
use interview_backend::models::interview::{
    Bid, BidStatus, Interview, InterviewStatus, InterviewType,
};
use interview_backend::services::enrichment_service::EnrichmentService;

fn sample_interview(interview_date: DateTime<Utc>, status: InterviewStatus) -> Interview {
    Interview {
        id: Uuid::new_v4(),
        creator_id: Uuid::new_v4(),
        interviewee_id: Uuid::new_v4(),
        interviewer_id: None,
        interview_type: InterviewType::Talent.as_str().to_string(),
        talent_type: "SKILL".to_string(),
        talent_id: Uuid::new_v4(),
        interview_date,
        description: None,
        interviewee_date_time_agreement: false,
        status: status.as_str().to_string(),
        bids: Json(HashMap::new()),
        rating: None,
        comments: None,
        transaction: None,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

fn sample_bid(interviewer_id: Uuid, status: BidStatus) -> Bid {
    Bid {
        id: Uuid::new_v4(),
        interviewer_id,
        date_time_agreement: true,
        suggested_date_time: Utc::now(),
        fee: "50".to_string(),
        status,
    }
}

#[test]
fn interview_is_current_before_its_date() {
    let now = Utc::now();
    let interview = sample_interview(now + Duration::hours(2), InterviewStatus::Scheduled);
    assert!(!interview.is_completed(now));
}

#[test]
fn interview_is_completed_once_its_date_elapses() {
    let now = Utc::now();
    let interview = sample_interview(now - Duration::hours(2), InterviewStatus::Scheduled);
    assert!(interview.is_completed(now));
}

#[test]
fn terminal_status_completes_regardless_of_date() {
    let now = Utc::now();
    let interview = sample_interview(now + Duration::days(7), InterviewStatus::Completed);
    assert!(interview.is_completed(now));
}

#[test]
fn bidding_interview_with_future_date_is_current() {
    let now = Utc::now();
    let interview = sample_interview(now + Duration::days(1), InterviewStatus::Bidding);
    assert!(!interview.is_completed(now));
}

#[test]
fn accepted_interviewer_id_finds_the_selected_bid() {
    let now = Utc::now();
    let mut interview = sample_interview(now + Duration::days(1), InterviewStatus::Scheduled);
    let winner = Uuid::new_v4();
    let accepted = sample_bid(winner, BidStatus::Accepted);
    let pending = sample_bid(Uuid::new_v4(), BidStatus::Pending);
    interview.bids.0.insert(accepted.id, accepted);
    interview.bids.0.insert(pending.id, pending);

    assert_eq!(interview.accepted_interviewer_id(), Some(winner));
}

#[test]
fn accepted_interviewer_id_is_none_without_a_selection() {
    let now = Utc::now();
    let mut interview = sample_interview(now + Duration::days(1), InterviewStatus::Bidding);
    let pending = sample_bid(Uuid::new_v4(), BidStatus::Pending);
    interview.bids.0.insert(pending.id, pending);

    assert_eq!(interview.accepted_interviewer_id(), None);
}

#[test]
fn role_resolution_prefers_interviewer_over_other_roles() {
    let interviewer = Uuid::new_v4();
    let query = RoleQuery {
        interviewer_id: Some(interviewer),
        interviewee_id: Some(Uuid::new_v4()),
        creator_id: Some(Uuid::new_v4()),
    };
    let (role, id) = query.resolve().expect("resolvable");
    assert_eq!(role, InterviewRole::Interviewer);
    assert_eq!(id, interviewer);
}

#[test]
fn role_resolution_prefers_interviewee_over_creator() {
    let interviewee = Uuid::new_v4();
    let query = RoleQuery {
        interviewer_id: None,
        interviewee_id: Some(interviewee),
        creator_id: Some(Uuid::new_v4()),
    };
    let (role, id) = query.resolve().expect("resolvable");
    assert_eq!(role, InterviewRole::Interviewee);
    assert_eq!(id, interviewee);
}

#[test]
fn role_resolution_without_any_id_is_an_error() {
    let query = RoleQuery::default();
    assert!(query.resolve().is_err());
}

#[test]
fn bid_status_defaults_to_pending() {
    let bid: Bid = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "interviewer_id": Uuid::new_v4(),
        "date_time_agreement": false,
        "suggested_date_time": "2026-10-01T10:00:00Z",
        "fee": "50"
    }))
    .expect("bid without status");
    assert_eq!(bid.status, BidStatus::Pending);
}

#[test]
fn bid_map_round_trips_through_json() {
    let bid = sample_bid(Uuid::new_v4(), BidStatus::Pending);
    let mut map = HashMap::new();
    map.insert(bid.id, bid.clone());

    let value = serde_json::to_value(&map).expect("serialize");
    assert_eq!(value[bid.id.to_string()]["fee"], "50");
    assert_eq!(value[bid.id.to_string()]["status"], "PENDING");

    let decoded: HashMap<Uuid, Bid> = serde_json::from_value(value).expect("deserialize");
    assert_eq!(decoded[&bid.id].interviewer_id, bid.interviewer_id);
}

#[test]
fn update_bid_patch_contains_only_supplied_fields() {
    let payload = UpdateBidPayload {
        date_time_agreement: None,
        suggested_date_time: None,
        fee: Some("75".to_string()),
    };
    let patch = payload.to_patch().expect("patch");
    let object = patch.as_object().expect("object");
    assert_eq!(object.len(), 1);
    assert_eq!(object["fee"], "75");
}

#[test]
fn update_bid_payload_rejects_status_changes() {
    let attempt = serde_json::from_value::<UpdateBidPayload>(json!({ "status": "ACCEPTED" }));
    assert!(attempt.is_err());

    let attempt =
        serde_json::from_value::<UpdateBidPayload>(json!({ "fee": "90", "status": "REJECTED" }));
    assert!(attempt.is_err());
}

#[test]
fn current_interviews_split_into_talent_and_projects() {
    let now = Utc::now();
    let mut talent = sample_interview(now + Duration::days(1), InterviewStatus::Bidding);
    talent.interview_type = InterviewType::Talent.as_str().to_string();
    let mut project = sample_interview(now + Duration::days(2), InterviewStatus::Scheduled);
    project.interview_type = InterviewType::Business.as_str().to_string();

    let views = vec![
        EnrichmentService::attach_details(talent, None, &HashMap::new()),
        EnrichmentService::attach_details(project, None, &HashMap::new()),
    ];
    let grouped = CurrentInterviewsResponse::group(views);
    assert_eq!(grouped.talent.len(), 1);
    assert_eq!(grouped.projects.len(), 1);
    assert_eq!(grouped.projects[0].interview_type, "BUSINESS");
}
