//! Implementation of the `depot lock` and `depot locks` commands.
//!
//! `depot lock` works like flock(1): it takes the lock file for a logical
//! file in the shared lock directory, resolves the version while holding
//! it, and runs a child command with the resolved path in `DEPOT_FILE`.

use super::Session;
use crate::cli::{LockArgs, LocksArgs};
use crate::error::{DepotError, Result};
use crate::locks::{self, CancelToken, LockMode, LockOptions};
use crate::versions::{VersionToken, resolve_version};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::Duration;

/// Environment variable carrying the resolved path to the child.
pub const FILE_ENV: &str = "DEPOT_FILE";

/// Environment variable carrying the held lock mode to the child.
pub const LOCK_MODE_ENV: &str = "DEPOT_LOCK_MODE";

/// Failure of the command run under the lock.
#[derive(Debug, thiserror::Error)]
pub enum ChildError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Argument vector for the child: `--command` split like a shell would,
/// or the arguments after `--`.
fn child_argv(args: &LockArgs) -> Result<Vec<String>> {
    let argv = match &args.command {
        Some(line) => shell_words::split(line)
            .map_err(|e| DepotError::UserError(format!("invalid --command '{}': {}", line, e)))?,
        None => args.args.clone(),
    };

    if argv.is_empty() {
        return Err(DepotError::UserError(
            "no command given (use --command \"...\" or -- <command> [args...])".to_string(),
        ));
    }
    Ok(argv)
}

fn lock_options(session: &Session, max_wait: Option<f64>) -> Result<LockOptions> {
    let options = LockOptions::from_config(&session.config);
    match max_wait {
        Some(seconds) => {
            let max_wait = Duration::try_from_secs_f64(seconds).map_err(|_| {
                DepotError::UserError(format!("invalid --max-wait '{}'", seconds))
            })?;
            Ok(options.with_max_wait(max_wait))
        }
        None => Ok(options),
    }
}

fn run_child(argv: &[String], target: &Path, mode: LockMode) -> std::result::Result<(), ChildError> {
    let (program, rest) = argv.split_first().ok_or_else(|| ChildError::Spawn {
        program: String::new(),
        source: std::io::Error::other("empty command"),
    })?;

    tracing::info!(program = %program, file = %target.display(), mode = %mode, "running command under lock");
    let status = Command::new(program)
        .args(rest)
        .env(FILE_ENV, target)
        .env(LOCK_MODE_ENV, mode.as_str())
        .status()
        .map_err(|source| ChildError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ChildError::Failed {
            program: program.clone(),
            status,
        })
    }
}

/// Take the lock, resolve the version, run the child, release.
///
/// Returns the resolved path. Lock and resolution failures keep their own
/// error kinds; only a failing child becomes `DepotError::LockScopeError`.
pub fn run_locked(session: &Session, args: &LockArgs, cancel: &CancelToken) -> Result<PathBuf> {
    let argv = child_argv(args)?;
    let mode: LockMode = args.mode.parse()?;
    let token: VersionToken = args.version.parse()?;
    let options = lock_options(session, args.max_wait)?;
    let (spec, repo_dir) = session.locate(&args.file)?;

    let lock_path = locks::lock_file_path(&session.ctx.lock_dir, &spec);
    let lock = locks::acquire_path(&lock_path, mode, &options, cancel)?;

    let target = resolve_version(token, &repo_dir, &spec)?;
    let outcome = run_child(&argv, &target, mode);
    let released = lock.release();

    finish_scope(outcome, released)?;
    Ok(target)
}

/// Combine the child's outcome with the release result.
///
/// A failing child wins; a release failure behind it is only logged.
fn finish_scope(outcome: std::result::Result<(), ChildError>, released: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => released,
        Err(e) => {
            if let Err(release_err) = released {
                tracing::warn!(error = %release_err, "failed to release lock after command failure");
            }
            Err(DepotError::LockScopeError {
                source: Box::new(e),
            })
        }
    }
}

/// Execute the `depot lock` command.
pub fn cmd_lock(session: &Session, args: LockArgs) -> Result<()> {
    run_locked(session, &args, &CancelToken::new())?;
    Ok(())
}

/// Execute the `depot locks` command.
pub fn cmd_locks(session: &Session, args: LocksArgs) -> Result<()> {
    let locks = locks::list_locks(&session.ctx.lock_dir)?;

    if args.json {
        let out = serde_json::to_string_pretty(&locks)
            .map_err(|e| DepotError::UserError(format!("failed to serialize locks: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if locks.is_empty() {
        println!("No lock files in {}.", session.ctx.lock_dir.display());
        return Ok(());
    }

    let held = locks.iter().filter(|l| l.held).count();
    println!("Lock files ({}, {} held):", locks.len(), held);
    println!();
    for lock in &locks {
        println!("  {}", lock);
        if lock.held
            && let Some(holder) = &lock.holder
        {
            println!("    PID:        {}", holder.pid);
            println!("    Acquired:   {}", holder.acquired_at.to_rfc3339());
        }
    }

    Ok(())
}
