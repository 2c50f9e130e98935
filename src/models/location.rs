use crate::domain::{Coordinates, LocationId};
use serde::{Deserialize, Serialize};

/// A geocoded place, keyed by the query text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Assigned by the store; `None` until the row has been persisted.
    pub id: Option<LocationId>,
}

impl Location {
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn with_id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }
}
