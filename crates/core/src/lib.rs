pub mod config;
pub mod directory;
pub mod error;
pub mod monitor;
pub mod project;

pub use config::Config;
pub use directory::*;
pub use error::*;
pub use monitor::*;
pub use project::*;
