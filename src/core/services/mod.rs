pub mod deletion_service;
