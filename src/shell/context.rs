//! Per-invocation execution context and the long-lived execution scope.

use super::registry::CommandRegistry;
use crate::client::{Connector, Session};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::output::OutputFormatter;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::watch;
use tracing::debug;

/// Drives async client calls for the shell and carries the cancellation flag.
///
/// Owns a current-thread runtime; every command runs its futures through
/// [`ExecutionScope::run`]. Cancelled once, at shutdown.
pub struct ExecutionScope {
    runtime: Runtime,
    cancel_tx: watch::Sender<bool>,
}

impl ExecutionScope {
    pub fn new() -> Result<Self, ShellError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let (cancel_tx, _) = watch::channel(false);
        Ok(Self { runtime, cancel_tx })
    }

    /// Run a future to completion, or fail with [`ShellError::Cancelled`] once cancelled.
    pub fn run<F, T>(&self, future: F) -> Result<T, ShellError>
    where
        F: Future<Output = T>,
    {
        let mut cancelled = self.cancel_tx.subscribe();
        if *cancelled.borrow() {
            return Err(ShellError::Cancelled);
        }
        self.runtime.block_on(async move {
            tokio::select! {
                value = future => Ok(value),
                _ = cancelled.wait_for(|c| *c) => Err(ShellError::Cancelled),
            }
        })
    }

    pub fn cancel(&self) {
        if !self.is_cancelled() {
            debug!("Cancelling execution scope");
            self.cancel_tx.send_replace(true);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }
}

/// Everything a command may touch during one invocation.
///
/// Borrowed from the shell for the duration of a single `execute` call.
pub struct ExecutionContext<'a> {
    pub scope: &'a ExecutionScope,
    pub session: &'a mut Option<Session>,
    pub config: &'a mut ShellConfig,
    pub output: &'a mut OutputFormatter,
    pub connector: &'a dyn Connector,
    pub commands: &'a CommandRegistry,
}

impl<'a> ExecutionContext<'a> {
    /// Guard for session-gated commands.
    ///
    /// Fails with [`ShellError::NotConnected`] unless a valid session is present.
    /// On success the idle timer is refreshed and a handle to the session returned.
    pub fn require_session(&mut self) -> Result<Session, ShellError> {
        match self.session.as_mut() {
            Some(session) if session.is_valid() => {
                session.touch();
                Ok(session.clone())
            }
            _ => Err(ShellError::NotConnected),
        }
    }

    /// Shorthand for [`ExecutionScope::run`].
    pub fn run<F, T>(&self, future: F) -> Result<T, ShellError>
    where
        F: Future<Output = T>,
    {
        self.scope.run(future)
    }
}
