use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::bid_dto::{CreateBidPayload, UpdateBidPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/interview/{interview_id}/interview-bids",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Interview with its bids enriched"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn get_all_interview_bids(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get_by_id(id).await?;
    let mut views = state.enrichment_service.enrich(vec![interview]).await?;
    // enrich preserves batch size, so exactly one view comes back
    let view = views
        .pop()
        .ok_or_else(|| crate::error::Error::Internal("enrichment dropped interview".to_string()))?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/interview/{interview_id}/interview-bids/{bid_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID"),
        ("bid_id" = Uuid, Path, description = "Bid ID")
    ),
    responses(
        (status = 200, description = "Single bid"),
        (status = 404, description = "Interview or bid not found")
    )
)]
#[axum::debug_handler]
pub async fn get_interview_bid(
    State(state): State<AppState>,
    Path((id, bid_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let bid = state.bid_service.get_bid(id, bid_id).await?;
    Ok(Json(bid))
}

#[utoipa::path(
    get,
    path = "/interview/interview-bids/{interviewer_id}",
    params(
        ("interviewer_id" = Uuid, Path, description = "Interviewer ID")
    ),
    responses(
        (status = 200, description = "Interviews holding a bid from this interviewer")
    )
)]
#[axum::debug_handler]
pub async fn bids_by_interviewer(
    State(state): State<AppState>,
    Path(interviewer_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interviews = state.bid_service.bids_by_interviewer(interviewer_id).await?;
    Ok(Json(interviews))
}

#[utoipa::path(
    post,
    path = "/interview/interview-bids/{interview_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID")
    ),
    request_body = CreateBidPayload,
    responses(
        (status = 201, description = "Bid created"),
        (status = 400, description = "Invalid payload or bid limit reached"),
        (status = 404, description = "Interview or interviewer not found")
    )
)]
#[axum::debug_handler]
pub async fn create_interview_bid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateBidPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let bid = state.bid_service.create_bid(id, payload).await?;
    state.notification_service.notify(
        "interview.bid_placed",
        json!({ "interview_id": id, "bid_id": bid.id, "interviewer_id": bid.interviewer_id }),
    );
    Ok((StatusCode::CREATED, Json(bid)))
}

#[utoipa::path(
    put,
    path = "/interview/{interview_id}/interview-bids/{bid_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID"),
        ("bid_id" = Uuid, Path, description = "Bid ID")
    ),
    request_body = UpdateBidPayload,
    responses(
        (status = 200, description = "Bid updated"),
        (status = 404, description = "Interview or bid not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview_bid(
    State(state): State<AppState>,
    Path((id, bid_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateBidPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let bid = state.bid_service.update_bid(id, bid_id, payload).await?;
    state.notification_service.notify(
        "interview.bid_updated",
        json!({ "interview_id": id, "bid_id": bid.id }),
    );
    Ok(Json(bid))
}

#[utoipa::path(
    delete,
    path = "/interview/{interview_id}/interview-bids/{bid_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID"),
        ("bid_id" = Uuid, Path, description = "Bid ID")
    ),
    responses(
        (status = 204, description = "Bid removed (idempotent)"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_interview_bid(
    State(state): State<AppState>,
    Path((id, bid_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state.bid_service.delete_bid(id, bid_id).await?;
    state.notification_service.notify(
        "interview.bid_deleted",
        json!({ "interview_id": id, "bid_id": bid_id }),
    );
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/interview/{interview_id}/interview-bids/{bid_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID"),
        ("bid_id" = Uuid, Path, description = "Bid ID")
    ),
    responses(
        (status = 200, description = "Bid selected, interviewer bound"),
        (status = 404, description = "Interview or bid not found")
    )
)]
#[axum::debug_handler]
pub async fn select_interview_bid(
    State(state): State<AppState>,
    Path((id, bid_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let interview = state.bid_service.select_bid(id, bid_id).await?;
    state.notification_service.notify(
        "interview.bid_selected",
        json!({
            "interview_id": interview.id,
            "bid_id": bid_id,
            "interviewer_id": interview.interviewer_id,
        }),
    );
    Ok(Json(interview))
}
