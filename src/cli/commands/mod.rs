pub mod audit_helpers;
pub mod delete;
pub mod list;
pub mod log;
pub mod show;
pub mod store_helpers;
