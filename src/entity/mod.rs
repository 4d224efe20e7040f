pub mod air_quality_readings;
pub mod components;
pub mod locations;
pub mod raw_air_data;
pub mod reading_components;
