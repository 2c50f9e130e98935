pub mod business;
pub mod forecast;
pub mod location;
pub mod movie;

pub use business::Business;
pub use forecast::ForecastDay;
pub use location::Location;
pub use movie::Movie;
