//! Terminal interaction

pub mod console;

pub use console::Console;
