//! Forward-only progressions.
//!
//! A progression enum lists the moves it allows; everything else is
//! rejected with a [`ValidationError`].

use super::ValidationError;

/// An enum whose values move along declared edges only.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Whether `self -> target` is a declared edge.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one move.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Moves to `target`, or explains why the move is not allowed.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "stage",
                format!("{:?} cannot move to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// A state with no outgoing edges.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
