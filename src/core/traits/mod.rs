pub mod audit;
pub mod key_store;
pub mod prompter;
