//! CLI command handlers.

mod copy;
mod simulate;

pub use copy::run_copy;
pub use simulate::run_simulate;
