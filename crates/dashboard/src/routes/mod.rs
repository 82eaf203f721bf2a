pub mod assessment;
pub mod conditions;
pub mod flight;
pub mod telemetry;
