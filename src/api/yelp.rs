use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::{QueryParams, parse_coordinates};
use super::{ApiError, AppState};
use crate::models::Business;

/// `GET /yelp?latitude=<lat>&longitude=<lng>`
pub async fn get_businesses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<Business>>, ApiError> {
    let coordinates = parse_coordinates(&params)?;

    let businesses = state.resolver().resolve_businesses(coordinates).await?;
    Ok(Json(businesses))
}
