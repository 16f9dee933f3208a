use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::interview_dto::{
        CreateInterviewPayload, CurrentInterviewsResponse, InterviewListQuery, RoleQuery,
        UpdateInterviewPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/interview/{creator_id}",
    params(
        ("creator_id" = Uuid, Path, description = "Creator ID")
    ),
    request_body = CreateInterviewPayload,
    responses(
        (status = 201, description = "Interview created"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Interviewee not found")
    )
)]
#[axum::debug_handler]
pub async fn create_interview(
    State(state): State<AppState>,
    Path(creator_id): Path<Uuid>,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.create(creator_id, payload).await?;
    state.notification_service.notify(
        "interview.created",
        json!({
            "interview_id": interview.id,
            "interviewee_id": interview.interviewee_id,
            "interview_date": interview.interview_date,
        }),
    );
    Ok((StatusCode::CREATED, Json(interview)))
}

#[utoipa::path(
    put,
    path = "/interview/{interview_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID")
    ),
    request_body = UpdateInterviewPayload,
    responses(
        (status = 200, description = "Interview updated"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.update(id, payload).await?;
    state.notification_service.notify(
        "interview.updated",
        json!({ "interview_id": interview.id, "status": interview.status }),
    );
    Ok(Json(interview))
}

#[utoipa::path(
    delete,
    path = "/interview/{interview_id}",
    params(
        ("interview_id" = Uuid, Path, description = "Interview ID")
    ),
    responses(
        (status = 204, description = "Interview deleted"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.interview_service.delete(id).await?;
    state
        .notification_service
        .notify("interview.deleted", json!({ "interview_id": id }));
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/interview",
    params(
        ("intervieweeId" = Option<Uuid>, Query, description = "Filter by interviewee"),
        ("interviewerId" = Option<Uuid>, Query, description = "Filter by selected interviewer"),
        ("interviewType" = Option<String>, Query, description = "Filter by interview type"),
        ("talentType" = Option<String>, Query, description = "Filter by talent type"),
        ("talentId" = Option<Uuid>, Query, description = "Filter by talent"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("limit" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Interviews open for bidding, enriched")
    )
)]
#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list_all(&query).await?;
    let views = state.enrichment_service.enrich(interviews).await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/interview/current-interview",
    params(
        ("interviewerId" = Option<Uuid>, Query, description = "Interviewer role id"),
        ("intervieweeId" = Option<Uuid>, Query, description = "Interviewee role id"),
        ("creatorId" = Option<Uuid>, Query, description = "Creator role id")
    ),
    responses(
        (status = 200, description = "Current interviews grouped by kind"),
        (status = 400, description = "No role id supplied")
    )
)]
#[axum::debug_handler]
pub async fn current_interviews(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> Result<impl IntoResponse> {
    let (role, id) = query.resolve()?;
    let interviews = state.interview_service.current_interviews(role, id).await?;
    let views = state.enrichment_service.enrich(interviews).await?;
    Ok(Json(CurrentInterviewsResponse::group(views)))
}

#[utoipa::path(
    get,
    path = "/interview/completed-interview",
    params(
        ("interviewerId" = Option<Uuid>, Query, description = "Interviewer role id"),
        ("intervieweeId" = Option<Uuid>, Query, description = "Interviewee role id"),
        ("creatorId" = Option<Uuid>, Query, description = "Creator role id")
    ),
    responses(
        (status = 200, description = "Completed interviews"),
        (status = 400, description = "No role id supplied")
    )
)]
#[axum::debug_handler]
pub async fn completed_interviews(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> Result<impl IntoResponse> {
    let (role, id) = query.resolve()?;
    let interviews = state
        .interview_service
        .completed_interviews(role, id)
        .await?;
    let views = state.enrichment_service.enrich(interviews).await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/interview/interviewers/{talent_id}",
    params(
        ("talent_id" = Uuid, Path, description = "Talent ID")
    ),
    responses(
        (status = 200, description = "Interviewers verified for the talent")
    )
)]
#[axum::debug_handler]
pub async fn interviewers_by_talent(
    State(state): State<AppState>,
    Path(talent_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interviewers = state
        .enrichment_service
        .interviewers_by_talent(talent_id)
        .await?;
    Ok(Json(interviewers))
}

#[utoipa::path(
    get,
    path = "/interview/{interviewer_id}/talent",
    params(
        ("interviewer_id" = Uuid, Path, description = "Interviewer ID")
    ),
    responses(
        (status = 200, description = "Interviews matching the interviewer's verified talents"),
        (status = 404, description = "Freelancer not found")
    )
)]
#[axum::debug_handler]
pub async fn interviews_by_interviewer_talent(
    State(state): State<AppState>,
    Path(interviewer_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let talent_ids = state
        .enrichment_service
        .verified_talent_ids(interviewer_id)
        .await?;
    let interviews = state
        .interview_service
        .interviews_by_talent_ids(&talent_ids)
        .await?;
    Ok(Json(interviews))
}
