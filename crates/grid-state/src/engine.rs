//! The seam between this crate and a table engine.

use crate::state::{PartialTableState, TableState};

/// The two capabilities this crate needs from a table engine.
///
/// Row models, sorting and filtering stay inside the engine.
pub trait TableEngine {
    /// The engine's complete current state.
    fn state(&self) -> TableState;

    /// Reset to engine defaults, then apply `initial`.
    fn reset_state(&mut self, initial: &PartialTableState);
}

/// An engine that only holds state. Used by the demo CLI and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateOnlyEngine {
    state: TableState,
}

impl StateOnlyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change state the way user interaction would.
    pub fn update(&mut self, change: impl FnOnce(&mut TableState)) {
        change(&mut self.state);
    }
}

impl TableEngine for StateOnlyEngine {
    fn state(&self) -> TableState {
        self.state.clone()
    }

    fn reset_state(&mut self, initial: &PartialTableState) {
        self.state = TableState::with_initial(initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PaginationState;

    #[test]
    fn reset_discards_previous_state() {
        let mut engine = StateOnlyEngine::new();
        engine.update(|state| state.grouping = vec!["status".into()]);

        engine.reset_state(&PartialTableState {
            pagination: Some(PaginationState::new(1, 50)),
            ..Default::default()
        });

        let state = engine.state();
        assert!(state.grouping.is_empty());
        assert_eq!(state.pagination, PaginationState::new(1, 50));
    }
}
