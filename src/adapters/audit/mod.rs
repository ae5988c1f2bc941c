pub mod json_audit_logger;
