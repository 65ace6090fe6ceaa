//! Command implementations

mod abort;
mod run;
mod status;

pub use abort::run_abort;
pub use run::run_release;
pub use status::run_status;
