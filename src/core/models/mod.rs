pub mod audit_entry;
pub mod delete_intent;
pub mod delete_outcome;
pub mod key_record;
