use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub overview: Option<String>,
    pub average_votes: Option<f64>,
    pub total_votes: Option<i64>,
    /// `None` when the provider has no poster for this title.
    pub image_url: Option<String>,
    pub popularity: Option<f64>,
    pub released_on: Option<String>,
}
