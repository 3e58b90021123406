use super::organization_service;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schema::{GeoRadiusRequest, NameQuery, OrganizationsResponse, RectangleRequest};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use orgdir_core::{NewOrganization, Organization, OrganizationId};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", post(create_organization))
        .route("/organizations/search", get(search_by_name))
        .route("/organizations/geo/radius", post(search_by_radius))
        .route("/organizations/geo/rectangle", post(search_by_rectangle))
        .route("/organizations/{id}", get(get_organization))
}

async fn create_organization(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewOrganization>,
) -> Result<(StatusCode, Json<Organization>), ApiError> {
    let organization = state
        .with_session(move |conn| Ok(organization_service(conn)?.create_organization(input)?))
        .await?;
    Ok((StatusCode::CREATED, Json(organization)))
}

async fn get_organization(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrganizationId>,
) -> Result<Json<Organization>, ApiError> {
    let organization = state
        .with_session(move |conn| Ok(organization_service(conn)?.get_organization(id)?))
        .await?;
    Ok(Json(organization))
}

async fn search_by_name(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NameQuery>,
) -> Result<Json<OrganizationsResponse>, ApiError> {
    let organizations = state
        .with_session(move |conn| Ok(organization_service(conn)?.search_by_name(&query.name)?))
        .await?;
    Ok(Json(organizations.into()))
}

async fn search_by_radius(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GeoRadiusRequest>,
) -> Result<Json<OrganizationsResponse>, ApiError> {
    let query = request.into_query()?;
    let organizations = state
        .with_session(move |conn| Ok(organization_service(conn)?.search_by_radius(&query)?))
        .await?;
    Ok(Json(organizations.into()))
}

async fn search_by_rectangle(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RectangleRequest>,
) -> Result<Json<OrganizationsResponse>, ApiError> {
    let bounds = request.into_bounds()?;
    let organizations = state
        .with_session(move |conn| Ok(organization_service(conn)?.search_by_rectangle(&bounds)?))
        .await?;
    Ok(Json(organizations.into()))
}
