use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::validation::{QueryParams, param, validate_search_query};
use super::{ApiError, AppState};
use crate::models::Movie;

/// `GET /movies?data=<text>`
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let query = validate_search_query(param(&params, "data"))?;

    let movies = state.resolver().resolve_movies(query).await?;
    Ok(Json(movies))
}
