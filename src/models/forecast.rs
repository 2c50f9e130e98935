use crate::domain::LocationId;
use serde::{Deserialize, Serialize};

/// One day of forecast summary attached to a stored location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub forecast: String,
    /// Calendar date only, e.g. `Mon Jan 01 2024`.
    pub time: String,
    #[serde(skip_serializing)]
    pub location_id: Option<LocationId>,
}
