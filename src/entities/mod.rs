pub mod prelude;

pub mod locations;
pub mod weathers;
