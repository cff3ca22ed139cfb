pub mod dataset;
pub mod epochs;
pub mod error;
pub mod now;
