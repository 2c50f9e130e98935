use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::{QueryParams, parse_coordinates, parse_location_id};
use super::{ApiError, AppState};
use crate::models::ForecastDay;

/// `GET /weather?id=<id>&latitude=<lat>&longitude=<lng>`
///
/// The id selects the cached rows; the coordinates are only used on a miss.
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<ForecastDay>>, ApiError> {
    let location_id = parse_location_id(&params)?;
    let coordinates = parse_coordinates(&params)?;

    let days = state
        .resolver()
        .resolve_forecast(location_id, coordinates)
        .await?;
    Ok(Json(days))
}
