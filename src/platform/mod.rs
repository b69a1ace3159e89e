pub mod process_terminal;
