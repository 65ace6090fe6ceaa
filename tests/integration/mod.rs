//! Integration tests driving the compiled reltrain binary against
//! throwaway git repositories

mod helpers;
mod test_checkpoint;
mod test_guard;
mod test_status;
