pub mod ops_plan;
pub mod ops_publish;
pub mod ops_report;
