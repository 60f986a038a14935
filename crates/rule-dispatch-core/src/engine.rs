//! The dispatch engine: a swappable rule-set snapshot behind a small state machine.
//!
//! ```text
//! Unloaded ──load──▶ Ready ──begin_reload──▶ Reloading ──commit──▶ Ready
//!                      ▲                         │
//!                      └──────── drop ticket ────┘
//! ```
//!
//! Queries clone the current `Arc<RuleSet>` under a momentary read lock and
//! match with no lock held. A reload builds the new set outside the lock and
//! swaps it in under a momentary write lock.

use std::fmt;
use std::sync::Arc;

use miette::Diagnostic;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::assembler::AssemblyOptions;
use crate::dispatch::{dispatch, MatchResult, Query};
use crate::error::LoadWarning;
use crate::loader::load_with_limits;
use crate::model::RawSource;
use crate::pattern::PatternLimits;
use crate::rule_set::RuleSet;

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Nothing loaded yet.
    Unloaded,
    /// Serving queries.
    Ready,
    /// Serving queries from the previous snapshot while a reload is staged.
    Reloading,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => write!(f, "unloaded"),
            Self::Ready => write!(f, "ready"),
            Self::Reloading => write!(f, "reloading"),
        }
    }
}

/// Operation not allowed in the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum EngineError {
    /// Query or reload before the first load.
    #[error("no rule set loaded")]
    #[diagnostic(
        code(rule_dispatch::engine::not_loaded),
        help("call `load` before querying or reloading")
    )]
    NotLoaded,

    /// `load` called twice.
    #[error("rule set already loaded")]
    #[diagnostic(
        code(rule_dispatch::engine::already_loaded),
        help("use `begin_reload` to replace the loaded rule set")
    )]
    AlreadyLoaded,

    /// A reload ticket is still outstanding.
    #[error("a reload is already in progress")]
    #[diagnostic(code(rule_dispatch::engine::reload_in_progress))]
    ReloadInProgress,
}

enum EngineState {
    Unloaded,
    Ready(Arc<RuleSet>),
    Reloading(Arc<RuleSet>),
}

impl EngineState {
    fn status(&self) -> EngineStatus {
        match self {
            Self::Unloaded => EngineStatus::Unloaded,
            Self::Ready(_) => EngineStatus::Ready,
            Self::Reloading(_) => EngineStatus::Reloading,
        }
    }

    fn snapshot(&self) -> Option<&Arc<RuleSet>> {
        match self {
            Self::Unloaded => None,
            Self::Ready(set) | Self::Reloading(set) => Some(set),
        }
    }
}

/// Thread-safe dispatch facade.
///
/// # Example
///
/// ```
/// use rule_dispatch_core::{DispatchEngine, Query, RawSource};
///
/// let engine = DispatchEngine::new();
/// engine
///     .load(vec![RawSource::new("python.mdc", "---\nglobs: *.py\n---\nUse type hints.")])
///     .unwrap();
///
/// let result = engine.query(&Query::new("src/app.py")).unwrap();
/// assert_eq!(result.payload, "Use type hints.");
/// ```
pub struct DispatchEngine {
    state: RwLock<EngineState>,
    options: AssemblyOptions,
    limits: PatternLimits,
}

impl Default for DispatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("status", &self.status())
            .field("options", &self.options)
            .field("limits", &self.limits)
            .finish()
    }
}

impl DispatchEngine {
    /// Creates an unloaded engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EngineState::Unloaded),
            options: AssemblyOptions::default(),
            limits: PatternLimits::default(),
        }
    }

    /// Sets the assembly options used by every query.
    #[must_use]
    pub fn with_options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the limits used when compiling globs.
    #[must_use]
    pub fn with_limits(mut self, limits: PatternLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the assembly options.
    #[must_use]
    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Returns the current state.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.state.read().status()
    }

    /// Loads the first rule set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyLoaded`] unless the engine is unloaded.
    pub fn load<I>(&self, sources: I) -> Result<Vec<LoadWarning>, EngineError>
    where
        I: IntoIterator<Item = RawSource>,
    {
        if self.status() != EngineStatus::Unloaded {
            return Err(EngineError::AlreadyLoaded);
        }
        let (rules, warnings) = load_with_limits(sources, &self.limits);

        let mut state = self.state.write();
        if !matches!(*state, EngineState::Unloaded) {
            return Err(EngineError::AlreadyLoaded);
        }
        *state = EngineState::Ready(Arc::new(rules));
        Ok(warnings)
    }

    /// Returns the snapshot queries currently run against.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotLoaded`] before the first load.
    pub fn snapshot(&self) -> Result<Arc<RuleSet>, EngineError> {
        self.state
            .read()
            .snapshot()
            .cloned()
            .ok_or(EngineError::NotLoaded)
    }

    /// Answers one query from the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotLoaded`] before the first load.
    pub fn query(&self, query: &Query) -> Result<MatchResult, EngineError> {
        let rules = self.snapshot()?;
        Ok(dispatch(&rules, query, &self.options))
    }

    /// Starts a reload. Queries keep using the current snapshot until the
    /// returned ticket is committed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotLoaded`] before the first load and
    /// [`EngineError::ReloadInProgress`] while another ticket is outstanding.
    pub fn begin_reload(&self) -> Result<ReloadTicket<'_>, EngineError> {
        let mut state = self.state.write();
        let previous = match &*state {
            EngineState::Unloaded => return Err(EngineError::NotLoaded),
            EngineState::Reloading(_) => return Err(EngineError::ReloadInProgress),
            EngineState::Ready(set) => Arc::clone(set),
        };
        *state = EngineState::Reloading(Arc::clone(&previous));
        debug!("reload started");

        Ok(ReloadTicket {
            engine: self,
            previous,
            staged: None,
            finished: false,
        })
    }

    /// Replaces the rule set in one step.
    ///
    /// # Errors
    ///
    /// Same as [`begin_reload`](Self::begin_reload).
    pub fn reload<I>(&self, sources: I) -> Result<Vec<LoadWarning>, EngineError>
    where
        I: IntoIterator<Item = RawSource>,
    {
        let mut ticket = self.begin_reload()?;
        let warnings = ticket.load(sources);
        ticket.commit();
        Ok(warnings)
    }
}

/// An outstanding reload. Dropping it without [`commit`](Self::commit)
/// cancels the reload and keeps the previous snapshot.
#[must_use = "dropping the ticket cancels the reload"]
pub struct ReloadTicket<'a> {
    engine: &'a DispatchEngine,
    previous: Arc<RuleSet>,
    staged: Option<Arc<RuleSet>>,
    finished: bool,
}

impl ReloadTicket<'_> {
    /// Builds the replacement set. No lock is held while building.
    /// Calling it again replaces the staged set.
    pub fn load<I>(&mut self, sources: I) -> Vec<LoadWarning>
    where
        I: IntoIterator<Item = RawSource>,
    {
        let (rules, warnings) = load_with_limits(sources, &self.engine.limits);
        self.staged = Some(Arc::new(rules));
        warnings
    }

    /// Swaps the staged set in. Without a staged set the previous one is kept.
    pub fn commit(mut self) {
        let next = self
            .staged
            .take()
            .unwrap_or_else(|| Arc::clone(&self.previous));
        info!(
            previous = self.previous.len(),
            rules = next.len(),
            "reloaded rule set"
        );
        *self.engine.state.write() = EngineState::Ready(next);
        self.finished = true;
    }
}

impl Drop for ReloadTicket<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("reload cancelled, keeping previous rule set");
            *self.engine.state.write() = EngineState::Ready(Arc::clone(&self.previous));
        }
    }
}

impl fmt::Debug for ReloadTicket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadTicket")
            .field("previous", &self.previous.len())
            .field("staged", &self.staged.as_ref().map(|s| s.len()))
            .finish_non_exhaustive()
    }
}
