use std::collections::HashMap;

use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use interview_backend::models::freelancer::{FreelancerInfo, TalentInfo};
use interview_backend::models::interview::{Bid, BidStatus, Interview};
use interview_backend::services::enrichment_service::EnrichmentService;

fn interview_with_bids(bids: Vec<Bid>) -> Interview {
    let mut map = HashMap::new();
    for bid in bids {
        map.insert(bid.id, bid);
    }
    Interview {
        id: Uuid::new_v4(),
        creator_id: Uuid::new_v4(),
        interviewee_id: Uuid::new_v4(),
        interviewer_id: None,
        interview_type: "TALENT".to_string(),
        talent_type: "SKILL".to_string(),
        talent_id: Uuid::new_v4(),
        interview_date: Utc::now() + Duration::days(1),
        description: None,
        interviewee_date_time_agreement: false,
        status: "BIDDING".to_string(),
        bids: Json(map),
        rating: None,
        comments: None,
        transaction: None,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

fn bid_from(interviewer_id: Uuid) -> Bid {
    Bid {
        id: Uuid::new_v4(),
        interviewer_id,
        date_time_agreement: true,
        suggested_date_time: Utc::now(),
        fee: "50".to_string(),
        status: BidStatus::Pending,
    }
}

fn snapshot(id: Uuid) -> FreelancerInfo {
    FreelancerInfo {
        id,
        user_name: "ada".to_string(),
        skills: vec!["Rust".to_string()],
        work_experience: Some(5),
    }
}

#[test]
fn extract_interviewer_ids_dedups_across_interviews() {
    let shared = Uuid::new_v4();
    let other = Uuid::new_v4();
    let interviews = vec![
        interview_with_bids(vec![bid_from(shared), bid_from(other)]),
        interview_with_bids(vec![bid_from(shared)]),
        interview_with_bids(vec![]),
    ];

    let mut ids = EnrichmentService::extract_interviewer_ids(&interviews);
    ids.sort_unstable();
    let mut expected = vec![shared, other];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[test]
fn extract_interviewer_ids_is_empty_without_bids() {
    let interviews = vec![interview_with_bids(vec![])];
    assert!(EnrichmentService::extract_interviewer_ids(&interviews).is_empty());
}

#[test]
fn attach_details_joins_known_freelancers() {
    let interviewer = Uuid::new_v4();
    let interview = interview_with_bids(vec![bid_from(interviewer)]);
    let mut freelancers = HashMap::new();
    freelancers.insert(interviewer, snapshot(interviewer));

    let view = EnrichmentService::attach_details(interview, None, &freelancers);

    assert_eq!(view.bids.len(), 1);
    let attached = view.bids[0].interviewer.as_ref().expect("snapshot");
    assert_eq!(attached.user_name, "ada");
    assert_eq!(attached.skills, vec!["Rust".to_string()]);
}

#[test]
fn attach_details_degrades_when_freelancer_is_missing() {
    let interview = interview_with_bids(vec![bid_from(Uuid::new_v4())]);
    let view = EnrichmentService::attach_details(interview, None, &HashMap::new());

    assert_eq!(view.bids.len(), 1);
    assert!(view.bids[0].interviewer.is_none());
}

#[test]
fn attach_details_carries_the_resolved_talent() {
    let interview = interview_with_bids(vec![]);
    let talent_id = interview.talent_id;
    let talent = TalentInfo {
        id: talent_id,
        label: "Systems Programming".to_string(),
        talent_type: "SKILL".to_string(),
    };

    let view = EnrichmentService::attach_details(interview, Some(talent), &HashMap::new());

    let resolved = view.talent.expect("talent");
    assert_eq!(resolved.id, talent_id);
    assert_eq!(resolved.label, "Systems Programming");
}

#[test]
fn attach_details_flattens_the_bid_map_in_order() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let mut early = bid_from(first);
    early.suggested_date_time = Utc::now();
    let mut late = bid_from(second);
    late.suggested_date_time = Utc::now() + Duration::hours(3);

    let interview = interview_with_bids(vec![late, early]);
    let view = EnrichmentService::attach_details(interview, None, &HashMap::new());

    assert_eq!(view.bids.len(), 2);
    assert_eq!(view.bids[0].bid.interviewer_id, first);
    assert_eq!(view.bids[1].bid.interviewer_id, second);
}
