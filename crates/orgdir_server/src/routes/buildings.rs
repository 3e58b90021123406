use super::{building_service, organization_service};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::schema::{BuildingsResponse, OrganizationsResponse};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use orgdir_core::{Building, BuildingId, NewBuilding};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/buildings", get(list_buildings).post(create_building))
        .route("/buildings/{id}", get(get_building))
        .route("/buildings/{id}/organizations", get(list_organizations))
}

async fn create_building(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewBuilding>,
) -> Result<(StatusCode, Json<Building>), ApiError> {
    let building = state
        .with_session(move |conn| Ok(building_service(conn)?.create_building(input)?))
        .await?;
    Ok((StatusCode::CREATED, Json(building)))
}

async fn list_buildings(
    State(state): State<AppState>,
) -> Result<Json<BuildingsResponse>, ApiError> {
    let buildings = state
        .with_session(|conn| Ok(building_service(conn)?.list_buildings()?))
        .await?;
    Ok(Json(buildings.into()))
}

async fn get_building(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BuildingId>,
) -> Result<Json<Building>, ApiError> {
    let building = state
        .with_session(move |conn| Ok(building_service(conn)?.get_building(id)?))
        .await?;
    Ok(Json(building))
}

async fn list_organizations(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<BuildingId>,
) -> Result<Json<OrganizationsResponse>, ApiError> {
    let organizations = state
        .with_session(move |conn| Ok(organization_service(conn)?.list_in_building(id)?))
        .await?;
    Ok(Json(organizations.into()))
}
