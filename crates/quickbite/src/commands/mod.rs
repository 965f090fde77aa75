pub mod cities;
pub mod report;
