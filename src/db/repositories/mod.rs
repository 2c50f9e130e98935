pub mod forecast;
pub mod location;
