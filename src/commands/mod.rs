//! Command implementations for depot.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and the per-invocation [`Session`] they share.

mod catalog;
mod lock;
mod resolve;

use crate::cli::{Cli, Command, FileArgs};
use crate::config::Config;
use crate::context::RepositoryContext;
use crate::error::Result;
use crate::naming::FileSpec;
use std::path::PathBuf;

/// Config and repository context loaded once per invocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub ctx: RepositoryContext,
}

impl Session {
    /// Load config (explicit path, `DEPOT_CONFIG`, `./depot.yaml`, defaults)
    /// and resolve the repository root.
    pub fn load(config_path: Option<&std::path::Path>) -> Result<Self> {
        let config = Config::discover(config_path)?;
        let ctx = RepositoryContext::resolve(&config)?;
        tracing::debug!(root = %ctx.root.display(), lock_dir = %ctx.lock_dir.display(), "session ready");
        Ok(Self { config, ctx })
    }

    /// Translate CLI file arguments into a naming spec and its repository directory.
    pub fn locate(&self, file: &FileArgs) -> Result<(FileSpec, PathBuf)> {
        let repo_dir = self.ctx.repository_dir(&file.repository)?;
        let spec = self.config.file_spec(
            &file.id,
            &file.content_type,
            file.part,
            &file.format,
            file.milestone.as_deref(),
        )?;
        Ok((spec, repo_dir))
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(cli: Cli) -> Result<()> {
    let session = Session::load(cli.config.as_deref())?;

    match cli.command {
        Command::Resolve(args) => resolve::cmd_resolve(&session, args),
        Command::Versions(args) => resolve::cmd_versions(&session, args),
        Command::Mime(args) => catalog::cmd_mime(&session, args),
        Command::Check(args) => catalog::cmd_check(&session, args),
        Command::Lock(args) => lock::cmd_lock(&session, args),
        Command::Locks(args) => lock::cmd_locks(&session, args),
    }
}

#[cfg(test)]
pub(crate) mod test_session {
    use super::*;
    use crate::cli::FileArgs;
    use std::path::Path;

    /// Session rooted at `root` with default config.
    pub(crate) fn session_at(root: &Path) -> Session {
        let config = Config::default();
        let ctx = RepositoryContext::from_root(root, &config);
        Session { config, ctx }
    }

    pub(crate) fn file_args(id: &str, content_type: &str, format: &str) -> FileArgs {
        FileArgs {
            repository: "onedep-deposit".to_string(),
            id: id.to_string(),
            content_type: content_type.to_string(),
            format: format.to_string(),
            part: 1,
            milestone: None,
        }
    }
}
