pub mod art;
pub mod command_registry;
mod commands;
pub mod config;
pub mod error;
pub mod games;
pub mod interpreter;
pub mod path;
pub mod persistence;
pub mod profile;
pub mod state;
pub mod vfs;
pub mod weather;

pub use command_registry::*;
pub use config::*;
pub use error::*;
pub use interpreter::*;
pub use persistence::*;
pub use profile::*;
pub use state::*;
pub use vfs::*;
pub use weather::*;
