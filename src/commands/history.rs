//! Undo/redo history of ticks.
//!
//! A tick is the ordered sequence of commands one operation produced. The
//! history keeps two stacks of ticks:
//!
//! - `done`: ticks that are currently applied, oldest first
//! - `redo`: ticks that were undone, most recently undone last
//!
//! Starting a new tick clears the redo stack; there is no branching history.
//! Both stacks are `im::Vector`s so cloning a game snapshot is O(1).

use im::Vector;
use tracing::warn;

use crate::core::GridError;
use crate::game::GameEvent;
use crate::grid::Grid;

use super::command::Command;

/// Commands produced by one operation, in causal order.
pub type Tick = Vec<Command>;

/// Log an invariant violation and keep going.
pub(crate) fn note_violation(command: &Command, error: GridError, violations: &mut Vec<GridError>) {
    warn!(?command, %error, "state invariant violation");
    violations.push(error);
}

/// Two-stack tick history.
///
/// ## Usage
///
/// ```
/// use rulegrid::commands::{Command, History};
/// use rulegrid::core::{Direction, EntityTypeId, Position};
/// use rulegrid::grid::Grid;
///
/// let mut grid = Grid::new(2, 1);
/// let rock = grid.spawn(EntityTypeId::new(1), Position::new(0, 0), Direction::Up).unwrap();
/// let start = grid.clone();
///
/// let mut command = Command::step(grid.block(rock).unwrap(), Direction::Right);
/// command.perform(&mut grid, &mut Vec::new()).unwrap();
///
/// let mut history = History::new();
/// history.push(vec![command]);
///
/// assert!(history.undo(&mut grid, &mut Vec::new(), &mut Vec::new()));
/// assert_eq!(grid, start);
/// assert!(history.can_redo());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    done: Vector<Tick>,
    redo: Vector<Tick>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed tick. Empty ticks are not recorded.
    ///
    /// Returns true if the tick was recorded.
    pub fn push(&mut self, tick: Tick) -> bool {
        if tick.is_empty() {
            return false;
        }
        self.done.push_back(tick);
        true
    }

    /// Drop every undone tick.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of ticks that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.done.len()
    }

    /// Number of ticks that can be redone.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Revert the most recent tick, undoing its commands in reverse order.
    ///
    /// Returns false (and changes nothing) if there is nothing to undo.
    /// A command whose inverse fails is reported and skipped.
    pub fn undo(
        &mut self,
        grid: &mut Grid,
        events: &mut Vec<GameEvent>,
        violations: &mut Vec<GridError>,
    ) -> bool {
        let Some(tick) = self.done.pop_back() else {
            return false;
        };
        for command in tick.iter().rev() {
            if let Err(error) = command.undo(grid, events) {
                note_violation(command, error, violations);
            }
        }
        self.redo.push_back(tick);
        true
    }

    /// Re-apply the most recently undone tick, in original order.
    ///
    /// Returns false (and changes nothing) if there is nothing to redo.
    pub fn redo(
        &mut self,
        grid: &mut Grid,
        events: &mut Vec<GameEvent>,
        violations: &mut Vec<GridError>,
    ) -> bool {
        let Some(mut tick) = self.redo.pop_back() else {
            return false;
        };
        for command in &mut tick {
            if let Err(error) = command.perform(grid, events) {
                note_violation(command, error, violations);
            }
        }
        self.done.push_back(tick);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, EntityTypeId, Position};
    use crate::grid::BlockId;

    const ROCK: EntityTypeId = EntityTypeId::new(1);
    const FLAG: EntityTypeId = EntityTypeId::new(2);

    fn perform(grid: &mut Grid, mut commands: Vec<Command>) -> Tick {
        for command in &mut commands {
            command.perform(grid, &mut Vec::new()).unwrap();
        }
        commands
    }

    fn setup() -> (Grid, BlockId, BlockId) {
        let mut grid = Grid::new(4, 1);
        let a = grid.spawn(ROCK, Position::new(0, 0), Direction::Up).unwrap();
        let b = grid.spawn(ROCK, Position::new(1, 0), Direction::Up).unwrap();
        (grid, a, b)
    }

    #[test]
    fn test_empty_tick_not_recorded() {
        let mut history = History::new();
        assert!(!history.push(Vec::new()));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let (mut grid, _, _) = setup();
        let before = grid.clone();
        let mut history = History::new();
        let mut events = Vec::new();

        assert!(!history.undo(&mut grid, &mut events, &mut Vec::new()));
        assert!(!history.redo(&mut grid, &mut events, &mut Vec::new()));
        assert_eq!(grid, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_undo_reverses_order_and_redo_replays() {
        let (mut grid, a, b) = setup();
        let start = grid.clone();
        let mut history = History::new();

        // b moves first, then a follows into b's old cell and converts.
        let step_b = Command::step(grid.block(b).unwrap(), Direction::Right);
        let step_a = Command::step(grid.block(a).unwrap(), Direction::Right);
        let mut tick = perform(&mut grid, vec![step_b, step_a]);
        let convert = Command::convert(grid.block(a).unwrap(), FLAG);
        tick.extend(perform(&mut grid, vec![convert]));
        history.push(tick);
        let after = grid.clone();

        assert!(history.undo(&mut grid, &mut Vec::new(), &mut Vec::new()));
        assert_eq!(grid, start);
        assert_eq!(history.redo_depth(), 1);

        assert!(history.redo(&mut grid, &mut Vec::new(), &mut Vec::new()));
        assert_eq!(grid, after);
        assert_eq!(history.undo_depth(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_redo() {
        let (mut grid, a, _) = setup();
        let mut history = History::new();
        let destroy = Command::destroy(grid.block(a).unwrap());
        history.push(perform(&mut grid, vec![destroy]));
        history.undo(&mut grid, &mut Vec::new(), &mut Vec::new());
        assert!(history.can_redo());

        history.clear_redo();
        assert!(!history.can_redo());
    }

    #[test]
    fn test_failed_command_is_reported_not_fatal() {
        let (mut grid, a, b) = setup();
        let mut history = History::new();
        let commands = vec![
            Command::destroy(grid.block(a).unwrap()),
            Command::destroy(grid.block(b).unwrap()),
        ];
        history.push(perform(&mut grid, commands));
        history.undo(&mut grid, &mut Vec::new(), &mut Vec::new());

        // Detach `a` behind the history's back so redo cannot find it.
        grid.remove_block(a).unwrap();

        let mut violations = Vec::new();
        assert!(history.redo(&mut grid, &mut Vec::new(), &mut violations));
        assert_eq!(
            violations,
            vec![GridError::BlockNotInCell { block: a, position: Position::new(0, 0) }]
        );
        assert!(!grid.is_placed(b));
        assert_eq!(history.undo_depth(), 1);
    }
}
