//! One module per subcommand, each with its own `Args` and `execute`.

pub mod config;
pub mod evaluate;
pub mod version;
