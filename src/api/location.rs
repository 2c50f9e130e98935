use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::{QueryParams, param, validate_search_query};
use super::{ApiError, AppState};
use crate::models::Location;

/// `GET /location?data=<text>`
///
/// Serves the stored location for the exact query text, geocoding it on a miss.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Location>, ApiError> {
    let query = validate_search_query(param(&params, "data"))?;

    let location = state.resolver().resolve_location(query).await?;
    Ok(Json(location))
}
