pub mod error;
pub mod phase;
pub mod kpi;
pub mod joins;
pub mod trends;
pub mod revenue;
pub mod churn;
pub mod ranking;
pub mod sentiment;
pub mod report;
