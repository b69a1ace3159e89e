pub mod input;
pub mod input_event;
pub mod output;
pub mod terminal;
