pub mod health;
pub mod interview;
pub mod interview_bids;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::permissive_cors;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/interview", get(interview::list_interviews))
        .route(
            "/interview/current-interview",
            get(interview::current_interviews),
        )
        .route(
            "/interview/completed-interview",
            get(interview::completed_interviews),
        )
        .route(
            "/interview/interviewers/:id",
            get(interview::interviewers_by_talent),
        )
        .route(
            "/interview/interview-bids/:id",
            get(interview_bids::bids_by_interviewer)
                .post(interview_bids::create_interview_bid),
        )
        .route(
            "/interview/:id",
            axum::routing::post(interview::create_interview)
                .put(interview::update_interview)
                .delete(interview::delete_interview),
        )
        .route(
            "/interview/:id/talent",
            get(interview::interviews_by_interviewer_talent),
        )
        .route(
            "/interview/:id/interview-bids",
            get(interview_bids::get_all_interview_bids),
        )
        .route(
            "/interview/:id/interview-bids/:bid_id",
            get(interview_bids::get_interview_bid)
                .put(interview_bids::update_interview_bid)
                .delete(interview_bids::delete_interview_bid)
                .post(interview_bids::select_interview_bid),
        )
        .layer(TraceLayer::new_for_http())
        .layer(permissive_cors())
        .with_state(state)
}
