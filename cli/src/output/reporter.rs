//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`
//! and `Confirm`.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! and ask the operator without depending on any presentation type directly.

use anyhow::Result;
use console::Term;

use crate::application::ports::{Confirm, ProgressReporter};
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
/// - `detail()` prints the text indented (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    non_interactive: bool,
    term: Term,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    ///
    /// When `non_interactive` is set, or stderr is not a terminal, `confirm`
    /// answers with its default without prompting.
    #[must_use]
    pub fn new(ctx: &'a OutputContext, non_interactive: bool) -> Self {
        Self::with_term(ctx, non_interactive, Term::stderr())
    }

    /// Like [`TerminalReporter::new`], prompting on `term`.
    #[must_use]
    pub fn with_term(ctx: &'a OutputContext, non_interactive: bool, term: Term) -> Self {
        Self {
            ctx,
            non_interactive,
            term,
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }

    fn detail(&self, text: &str) {
        self.ctx.block(text);
    }
}

impl Confirm for TerminalReporter<'_> {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        if !self.term.is_term() {
            tracing::debug!(prompt, default, "no terminal, taking default answer");
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term)?;
        Ok(confirmed)
    }
}
