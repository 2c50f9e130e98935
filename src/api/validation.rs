//! Query-string parsing for the resource endpoints.
//!
//! Parameters are read from their plain key (`latitude`) and, failing that,
//! from the bracketed form older clients send (`data[latitude]`).

use std::collections::HashMap;

use super::ApiError;
use crate::domain::{Coordinates, LocationId};

pub type QueryParams = HashMap<String, String>;

#[must_use]
pub fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .or_else(|| params.get(&format!("data[{key}]")))
        .map(String::as_str)
}

/// Rejects blank input. The text itself is returned untouched because it is
/// the exact-match cache key.
pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    match query {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(ApiError::validation("Search query cannot be empty")),
    }
}

pub fn parse_location_id(params: &QueryParams) -> Result<LocationId, ApiError> {
    let raw = param(params, "id").ok_or_else(|| ApiError::validation("Missing location id"))?;

    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(LocationId::new(id)),
        _ => Err(ApiError::validation(format!(
            "Invalid location id: {raw}. ID must be a positive integer"
        ))),
    }
}

pub fn parse_coordinates(params: &QueryParams) -> Result<Coordinates, ApiError> {
    let latitude = parse_degrees(params, "latitude")?;
    let longitude = parse_degrees(params, "longitude")?;

    let coordinates = Coordinates::new(latitude, longitude);
    if !coordinates.is_valid() {
        return Err(ApiError::validation(format!(
            "Coordinates out of range: {coordinates}"
        )));
    }

    Ok(coordinates)
}

fn parse_degrees(params: &QueryParams, key: &str) -> Result<f64, ApiError> {
    let raw = param(params, key).ok_or_else(|| ApiError::validation(format!("Missing {key}")))?;

    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Invalid {key}: {raw}")))
}
