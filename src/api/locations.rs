//! Location endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::multiverse::Location;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LocationListQuery {
    #[serde(default)]
    pub include_residents: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationListResponse {
    pub count: usize,
    pub data: Vec<Location>,
}

/// GET /api/locations?include_residents=
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationListQuery>,
) -> Result<Json<LocationListResponse>, ApiError> {
    let locations = if query.include_residents {
        state.gateway.get_all_locations_with_residents().await?
    } else {
        state.gateway.get_all_locations().await?
    };

    Ok(Json(LocationListResponse {
        count: locations.len(),
        data: locations,
    }))
}

/// GET /api/locations/{id}, always with residents
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<i64>,
) -> Result<Json<Location>, ApiError> {
    let location = state.gateway.get_location_with_residents(location_id).await?;
    Ok(Json(location))
}
