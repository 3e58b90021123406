use super::{activity_service, organization_service};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schema::{ActivitiesResponse, HierarchyQuery, OrganizationsResponse};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use orgdir_core::{Activity, ActivityId, ActivityNode, NewActivity, FULL_HIERARCHY_LEVELS};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/{id}", get(get_activity))
        .route("/activities/{id}/organizations", get(list_organizations))
        .route(
            "/activities/{id}/organizations/hierarchy",
            get(list_organizations_in_hierarchy),
        )
}

async fn create_activity(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewActivity>,
) -> Result<(StatusCode, Json<Activity>), ApiError> {
    let activity = state
        .with_session(move |conn| Ok(activity_service(conn)?.create_activity(input)?))
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<ActivitiesResponse>, ApiError> {
    let activities = state
        .with_session(|conn| Ok(activity_service(conn)?.list_activities()?))
        .await?;
    Ok(Json(activities.into()))
}

async fn get_activity(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ActivityId>,
) -> Result<Json<ActivityNode>, ApiError> {
    let node = state
        .with_session(move |conn| Ok(activity_service(conn)?.get_activity_node(id)?))
        .await?;
    Ok(Json(node))
}

async fn list_organizations(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ActivityId>,
) -> Result<Json<OrganizationsResponse>, ApiError> {
    let organizations = state
        .with_session(move |conn| Ok(organization_service(conn)?.list_by_activity(id)?))
        .await?;
    Ok(Json(organizations.into()))
}

async fn list_organizations_in_hierarchy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ActivityId>,
    ApiQuery(query): ApiQuery<HierarchyQuery>,
) -> Result<Json<OrganizationsResponse>, ApiError> {
    let levels = query.level.unwrap_or(FULL_HIERARCHY_LEVELS);
    let organizations = state
        .with_session(move |conn| {
            Ok(organization_service(conn)?.list_organizations_in_hierarchy_within(id, levels)?)
        })
        .await?;
    Ok(Json(organizations.into()))
}
