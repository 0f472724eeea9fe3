// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Builds describe their filesystem effects as an [`OutputPlan`] (pure),
//! and [`deliver`] carries the plan out. The revalidation ledger records
//! when each route was last written.

mod ledger;
mod paths;
mod types;
mod writer;

pub use ledger::RevalidationLedger;
pub use paths::{
    is_safe_path, route_file_path, route_path_file, sanitize_filename, ROUTE_DOCUMENT,
};
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::{deliver, ensure_delivered};
