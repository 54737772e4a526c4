//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Handlers report through
//! the response envelope unless they write their own output.

pub mod audit;
pub mod backup;
pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod migrate;
pub mod passphrase;

pub use audit::handle_audit;
pub use backup::{handle_backup_command, BackupCommands};
pub use config::handle_config;
pub use export::handle_export;
pub use import::{handle_import, ImportArgs};
pub use init::handle_init;
pub use migrate::handle_migrate;

use crate::response::Response;

/// What a handler produced
#[derive(Debug)]
pub enum Outcome {
    /// Report with the response envelope
    Done(Response),
    /// Output already written to stdout
    Printed,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Outcome::Done(Response::success(message))
    }
}
