mod init;
mod location;
mod movies;
mod weather;
mod yelp;

pub use init::cmd_init;
pub use location::cmd_location;
pub use movies::cmd_movies;
pub use weather::cmd_weather;
pub use yelp::cmd_yelp;
