pub mod providers {

    pub const DEFAULT_BUSINESS_TERM: &str = "delis";

    pub const MOVIE_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w200_and_h300_bestv2";

    pub const USER_AGENT: &str = "Cityscope/1.0";
}

pub mod forecast {

    /// Day-of-week, month, day, year. No time-of-day component.
    pub const DATE_FORMAT: &str = "%a %b %d %Y";
}

pub mod resources {

    pub const LOCATION: &str = "location";

    pub const FORECAST: &str = "forecast";

    pub const BUSINESSES: &str = "businesses";

    pub const MOVIES: &str = "movies";
}
