pub mod csv;
pub mod format;
pub mod notify;
pub mod schedule;
pub mod utils;
pub mod validation;
