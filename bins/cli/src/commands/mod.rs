mod config;
mod emit;

pub use config::run_config_show;
pub use emit::{EmitArgs, EmitLevel, run_emit};
