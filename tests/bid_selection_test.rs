use std::env;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Connects to the database named by DATABASE_URL, or returns None so the
/// test can skip itself on machines without Postgres.
async fn try_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = env::var("DATABASE_URL").ok()?;
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(2))
        .connect(&url)
        .await
        .ok()
}

async fn seed_freelancer(pool: &PgPool, user_name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO freelancers (user_name, work_experience, connects) \
         VALUES ($1, 3, 500) RETURNING id",
    )
    .bind(user_name)
    .fetch_one(pool)
    .await
    .expect("seed freelancer")
}

async fn send(app: &Router, method: &str, uri: String, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn bid_selection_binds_interviewer_and_survives_bid_deletion() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not reachable");
        return;
    };
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    let _ = interview_backend::config::init_config();
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let run = Uuid::new_v4();
    let interviewee = seed_freelancer(&pool, &format!("interviewee_{run}")).await;
    let interviewer_a = seed_freelancer(&pool, &format!("interviewer_a_{run}")).await;
    let interviewer_b = seed_freelancer(&pool, &format!("interviewer_b_{run}")).await;
    let talent_id: Uuid =
        sqlx::query_scalar("INSERT INTO skills (label) VALUES ($1) RETURNING id")
            .bind(format!("rust_{run}"))
            .fetch_one(&pool)
            .await
            .expect("seed skill");

    let app = interview_backend::routes::router(interview_backend::AppState::new(pool.clone()));

    let (status, interview) = send(
        &app,
        "POST",
        format!("/interview/{}", Uuid::new_v4()),
        Some(json!({
            "interviewee_id": interviewee,
            "interview_type": "TALENT",
            "talent_type": "SKILL",
            "talent_id": talent_id,
            "interview_date": "2027-01-15T10:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(interview["status"], "BIDDING");
    let interview_id = interview["id"].as_str().unwrap().to_string();

    let mut bid_ids = Vec::new();
    for interviewer in [interviewer_a, interviewer_b] {
        let (status, bid) = send(
            &app,
            "POST",
            format!("/interview/interview-bids/{interview_id}"),
            Some(json!({
                "interviewer_id": interviewer,
                "date_time_agreement": true,
                "suggested_date_time": "2027-01-15T10:00:00Z",
                "fee": "70"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(bid["status"], "PENDING");
        bid_ids.push(bid["id"].as_str().unwrap().to_string());
    }

    // Selecting a bid binds its interviewer and schedules the interview.
    let (status, selected) = send(
        &app,
        "POST",
        format!("/interview/{interview_id}/interview-bids/{}", bid_ids[0]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selected["interviewer_id"], json!(interviewer_a));
    assert_eq!(selected["status"], "SCHEDULED");
    assert_eq!(selected["bids"][&bid_ids[0]]["status"], "ACCEPTED");
    assert_eq!(selected["bids"][&bid_ids[1]]["status"], "PENDING");

    // Re-selecting demotes the previous winner in the same statement.
    let (status, reselected) = send(
        &app,
        "POST",
        format!("/interview/{interview_id}/interview-bids/{}", bid_ids[1]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reselected["interviewer_id"], json!(interviewer_b));
    assert_eq!(reselected["bids"][&bid_ids[1]]["status"], "ACCEPTED");
    assert_eq!(reselected["bids"][&bid_ids[0]]["status"], "PENDING");

    // Deleting the winning bid drops the map entry but keeps the binding.
    let (status, _) = send(
        &app,
        "DELETE",
        format!("/interview/{interview_id}/interview-bids/{}", bid_ids[1]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, view) = send(
        &app,
        "GET",
        format!("/interview/{interview_id}/interview-bids"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["interviewer_id"], json!(interviewer_b));
    assert_eq!(view["status"], "SCHEDULED");
    let remaining: Vec<&str> = view["bids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|bid| bid["id"].as_str().unwrap())
        .collect();
    assert_eq!(remaining, vec![bid_ids[0].as_str()]);
}
