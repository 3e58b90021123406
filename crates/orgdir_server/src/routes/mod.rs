//! Router assembly.
//!
//! # Responsibility
//! - Mount directory routes under `/api/v1` behind the API-key gate.
//! - Serve `/` and `/health` without authentication.
//!
//! # Invariants
//! - Authentication runs before any request extractor, so an unauthenticated
//!   request never reaches body parsing or the database.

mod activities;
mod buildings;
mod organizations;

use crate::middleware::{log_request, require_api_key};
use crate::schema::{HealthResponse, RootResponse};
use crate::state::AppState;
use axum::routing::get;
use axum::{middleware, Json, Router};
use orgdir_core::{
    ActivityService, BuildingService, OrganizationService, RepoError, SqliteActivityRepository,
    SqliteBuildingRepository, SqliteOrganizationRepository,
};
use rusqlite::Connection;

pub const API_PREFIX: &str = "/api/v1";

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(organizations::routes())
        .merge(buildings::routes())
        .merge(activities::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Organization directory API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

type SqliteOrganizationService<'conn> = OrganizationService<
    SqliteOrganizationRepository<'conn>,
    SqliteActivityRepository<'conn>,
    SqliteBuildingRepository<'conn>,
>;

fn organization_service(conn: &Connection) -> Result<SqliteOrganizationService<'_>, RepoError> {
    Ok(OrganizationService::new(
        SqliteOrganizationRepository::try_new(conn)?,
        SqliteActivityRepository::try_new(conn)?,
        SqliteBuildingRepository::try_new(conn)?,
    ))
}

fn activity_service(
    conn: &Connection,
) -> Result<ActivityService<SqliteActivityRepository<'_>>, RepoError> {
    Ok(ActivityService::new(SqliteActivityRepository::try_new(
        conn,
    )?))
}

fn building_service(
    conn: &Connection,
) -> Result<BuildingService<SqliteBuildingRepository<'_>>, RepoError> {
    Ok(BuildingService::new(SqliteBuildingRepository::try_new(
        conn,
    )?))
}
