//! Consistency checks on [`GameState`].
//!
//! Each check runs after every applied move and every undo in debug builds.
//! Release builds skip them.

use tracing::warn;

use super::GameState;

/// Property of a state `S` that legal play never breaks.
pub trait Invariant<S> {
    /// True when `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property, used in violation reports.
    fn description() -> &'static str;
}

/// A property that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Statement of the failed property.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps a property statement.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Tuple of [`Invariant`]s checked as one.
pub trait InvariantSet<S> {
    /// Runs every check and reports all failures, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

pub mod alternating_turn;
pub mod history_consistent;
pub mod mark_balance;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use mark_balance::MarkBalanceInvariant;

/// Checks run by [`GameState`] after each change.
pub type TicTacToeInvariants = (
    HistoryConsistentInvariant,
    AlternatingTurnInvariant,
    MarkBalanceInvariant,
);

/// Panics in debug builds if `state` breaks any of [`TicTacToeInvariants`].
pub(crate) fn assert_invariants(state: &GameState) {
    if cfg!(debug_assertions) {
        if let Err(violations) = TicTacToeInvariants::check_all(state) {
            for violation in &violations {
                warn!(description = %violation.description, "Invariant violated");
            }
            panic!("Game invariants violated: {:?}", violations);
        }
    }
}
