pub mod audit;
pub mod key_stores;
pub mod prompt;
