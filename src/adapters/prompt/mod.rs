pub mod buffered_prompter;
