//! Command implementations.

pub mod analyze;
pub mod batch;

pub use self::analyze::execute_analyze;
pub use self::batch::execute_batch;
