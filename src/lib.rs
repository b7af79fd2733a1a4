pub mod cli;
pub mod error;
pub mod models;
pub mod rag;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use cli::{Cli, Commands};
pub use models::Config;
