//! Game orchestrator.
//!
//! `Game` owns the grid, the attribute table, the rule set and the history
//! exclusively. Callers drive it through a small operation surface:
//!
//! - `start_game` / `restart_game` / `stop_game` for lifecycle
//! - `tick` to resolve one operation
//! - `undo` / `redo` to walk the history
//!
//! and observe it through queries and buffered events.
//!
//! ## Tick pipeline
//!
//! 1. Refresh attributes and derive rules from the current grid
//! 2. Player movement, then autonomous movement (columns, then rows)
//! 3. Destructive interactions
//! 4. Refresh attributes and derive rules again
//! 5. Apply conversions
//! 6. Record the tick and run the win check
//!
//! Every step runs to completion. A command that fails an invariant check is
//! logged, kept in `violations()`, and skipped; the tick still completes.

use tracing::{debug, info};

use crate::attributes::AttributeTable;
use crate::commands::{note_violation, Command, History, Tick};
use crate::core::{
    AttributeCategory, Axis, ConfigPort, EngineError, GridError, MapId, OperationType, Result,
};
use crate::grid::{Block, BlockId, Catalog, Grid};
use crate::movement::{destructions, evaluate, GameResult, MovementResolver};
use crate::rules::{conversions, Rule, RuleAnalyzer, RuleSet};

use super::events::GameEvent;

/// Lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// No map loaded.
    #[default]
    Idle,
    /// Accepting operations.
    Running,
    /// Won. Only a restart or a new start continues from here.
    Finished,
}

/// Summary of one resolved operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub operation: OperationType,

    /// Commands performed by this tick.
    pub commands: usize,

    /// True if the tick was pushed onto the history.
    pub recorded: bool,

    /// Rules active after the tick.
    pub rules: usize,

    pub result: GameResult,
}

/// Everything that exists only while a map is loaded.
#[derive(Clone, Debug)]
struct Session {
    map: MapId,
    catalog: Catalog,
    grid: Grid,
    table: AttributeTable,
    rules: RuleSet,
    history: History,
    result: GameResult,
    analyzer: RuleAnalyzer,
    movement: MovementResolver,
}

impl Session {
    /// Rebuild the attribute table and rule set from the grid.
    fn refresh_rules(&mut self) {
        self.table.refresh(&self.catalog);
        self.rules = self.analyzer.derive(&self.grid, &self.catalog);
        self.rules.apply_persistent(&mut self.table);
    }

    /// Perform commands in order, appending the ones that succeeded to `tick`.
    fn run(
        &mut self,
        commands: Vec<Command>,
        tick: &mut Tick,
        events: &mut Vec<GameEvent>,
        violations: &mut Vec<GridError>,
    ) {
        for mut command in commands {
            match command.perform(&mut self.grid, events) {
                Ok(()) => tick.push(command),
                Err(error) => note_violation(&command, error, violations),
            }
        }
    }

    /// Apply conversion rules; re-derive if anything changed type.
    fn convert(&mut self, tick: &mut Tick, events: &mut Vec<GameEvent>, violations: &mut Vec<GridError>) {
        let pending = conversions(&self.rules, &self.grid, &self.catalog);
        if pending.is_empty() {
            return;
        }
        self.run(pending, tick, events, violations);
        self.refresh_rules();
    }
}

/// Turn-based rule-puzzle game over an injected config port.
///
/// ## Usage
///
/// ```
/// use rulegrid::core::OperationType;
/// use rulegrid::game::{Game, GameEvent};
/// use rulegrid::levels::{classic, LevelBuilder};
///
/// let (config, map) = LevelBuilder::new(4, 2)
///     .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
///     .place(classic::BABA, 0, 1)
///     .build();
///
/// let mut game = Game::new(config);
/// game.start_game(map).unwrap();
///
/// game.tick(OperationType::Right).unwrap();
/// assert_eq!(game.block(rulegrid::grid::BlockId::new(3)).unwrap().position.x, 1);
///
/// assert!(game.undo().unwrap());
/// assert!(game.take_events().contains(&GameEvent::GameStarted));
/// ```
#[derive(Clone, Debug)]
pub struct Game<C: ConfigPort> {
    config: C,
    status: GameStatus,
    session: Option<Session>,

    /// Map of the most recent successful start, for `restart_game`.
    last_map: Option<MapId>,

    events: Vec<GameEvent>,
    violations: Vec<GridError>,
}

impl<C: ConfigPort> Game<C> {
    /// Create an idle game over a config port.
    pub fn new(config: C) -> Self {
        Self {
            config,
            status: GameStatus::Idle,
            session: None,
            last_map: None,
            events: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Load a map and start playing it.
    ///
    /// The whole config and the map are validated first; on error nothing
    /// changes, including any game already running. Conversions the initial
    /// layout calls for are applied as part of the initial state and are not
    /// undoable.
    pub fn start_game(&mut self, map_id: MapId) -> Result<()> {
        let catalog = Catalog::build(&self.config)?;
        let map = self.config.require_map(map_id)?;
        catalog.validate_map(map)?;

        let mut grid = Grid::new(map.width, map.height);
        for placed in &map.blocks {
            grid.spawn(placed.entity_type, placed.position, placed.direction)?;
        }

        if self.session.is_some() {
            self.stop_game();
        }

        self.events.push(GameEvent::GameStarted);
        self.events
            .extend(grid.all_blocks().iter().copied().map(GameEvent::BlockCreated));

        let mut session = Session {
            map: map_id,
            catalog,
            grid,
            table: AttributeTable::new(),
            rules: RuleSet::new(),
            history: History::new(),
            result: GameResult::Uncertain,
            analyzer: RuleAnalyzer::new(),
            movement: MovementResolver::new(),
        };
        session.refresh_rules();
        let mut initial = Tick::new();
        session.convert(&mut initial, &mut self.events, &mut self.violations);

        info!(
            map = %map_id,
            blocks = session.grid.placed_count(),
            rules = session.rules.len(),
            "game started"
        );

        self.session = Some(session);
        self.last_map = Some(map_id);
        self.status = GameStatus::Running;
        Ok(())
    }

    /// Tear down the running game, if any.
    pub fn stop_game(&mut self) {
        if let Some(session) = self.session.take() {
            info!(map = %session.map, "game stopped");
            self.events.push(GameEvent::GameStopped);
        }
        self.status = GameStatus::Idle;
    }

    /// Start the most recently started map again from its initial layout.
    pub fn restart_game(&mut self) -> Result<()> {
        let map = self.last_map.ok_or(EngineError::NoMapLoaded)?;
        info!(map = %map, "restarting game");
        self.start_game(map)
    }

    /// Resolve one operation.
    ///
    /// `OperationType::None` is accepted and ignored: it does not touch the
    /// grid or the history.
    pub fn tick(&mut self, operation: OperationType) -> Result<TickReport> {
        if self.status != GameStatus::Running {
            return Err(EngineError::NotRunning);
        }
        let session = self.session.as_mut().ok_or(EngineError::NotRunning)?;

        if !operation.is_tick() {
            return Ok(TickReport {
                operation,
                commands: 0,
                recorded: false,
                rules: session.rules.len(),
                result: session.result,
            });
        }

        let events = &mut self.events;
        let violations = &mut self.violations;

        session.refresh_rules();
        session.history.clear_redo();
        let mut tick = Tick::new();

        if let Some(direction) = operation.direction() {
            let moves = session
                .movement
                .player_moves(&session.grid, &session.catalog, &session.table, direction);
            session.run(moves, &mut tick, events, violations);
        }

        for axis in [Axis::Vertical, Axis::Horizontal] {
            let moves = session
                .movement
                .autonomous_moves(&session.grid, &session.catalog, &session.table, axis);
            session.run(moves, &mut tick, events, violations);
        }

        let doomed = destructions(&session.grid, &session.catalog, &session.table);
        session.run(doomed, &mut tick, events, violations);

        session.refresh_rules();
        session.convert(&mut tick, events, violations);

        let commands = tick.len();
        let recorded = session.history.push(tick);

        let result = evaluate(&session.grid, &session.catalog, &session.table);
        let previous = std::mem::replace(&mut session.result, result);

        debug!(
            ?operation,
            commands,
            rules = session.rules.len(),
            ?result,
            "tick resolved"
        );

        let report = TickReport {
            operation,
            commands,
            recorded,
            rules: session.rules.len(),
            result,
        };
        self.announce(previous, result);
        Ok(report)
    }

    /// Revert the most recent recorded tick.
    ///
    /// Returns `Ok(false)` and changes nothing if the history is empty.
    pub fn undo(&mut self) -> Result<bool> {
        self.walk_history(|history, grid, events, violations| history.undo(grid, events, violations))
    }

    /// Re-apply the most recently undone tick.
    ///
    /// Returns `Ok(false)` and changes nothing if there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        self.walk_history(|history, grid, events, violations| history.redo(grid, events, violations))
    }

    fn walk_history(
        &mut self,
        step: impl FnOnce(&mut History, &mut Grid, &mut Vec<GameEvent>, &mut Vec<GridError>) -> bool,
    ) -> Result<bool> {
        if self.status != GameStatus::Running {
            return Err(EngineError::NotRunning);
        }
        let session = self.session.as_mut().ok_or(EngineError::NotRunning)?;

        if !step(&mut session.history, &mut session.grid, &mut self.events, &mut self.violations) {
            return Ok(false);
        }

        session.refresh_rules();
        let result = evaluate(&session.grid, &session.catalog, &session.table);
        let previous = std::mem::replace(&mut session.result, result);
        debug!(
            undo_depth = session.history.undo_depth(),
            redo_depth = session.history.redo_depth(),
            "history step"
        );

        self.announce(previous, result);
        Ok(true)
    }

    /// Emit `GameEnded` when the outcome changes to a decided one.
    fn announce(&mut self, previous: GameResult, result: GameResult) {
        if result == previous || !result.is_decided() {
            return;
        }
        let success = result == GameResult::Success;
        info!(success, "game ended");
        self.events.push(GameEvent::GameEnded { success });
        if success {
            self.status = GameStatus::Finished;
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &C {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Outcome of the latest win check.
    #[must_use]
    pub fn result(&self) -> GameResult {
        self.session
            .as_ref()
            .map_or(GameResult::Uncertain, |session| session.result)
    }

    /// Map currently loaded.
    #[must_use]
    pub fn map(&self) -> Option<MapId> {
        self.session.as_ref().map(|session| session.map)
    }

    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.session.as_ref().map(|session| &session.grid)
    }

    /// Placed blocks in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.session
            .iter()
            .flat_map(|session| session.grid.placed_blocks())
    }

    /// A block by id, placed or destroyed.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.grid().and_then(|grid| grid.block(id))
    }

    /// Rules active right now, in discovery order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        self.session
            .as_ref()
            .map_or(&[], |session| session.rules.as_slice())
    }

    /// True if the block currently has the attribute.
    #[must_use]
    pub fn has_attribute(&self, id: BlockId, attribute: AttributeCategory) -> bool {
        self.session.as_ref().is_some_and(|session| {
            session
                .grid
                .block(id)
                .is_some_and(|block| session.table.block_has(&session.catalog, block, attribute))
        })
    }

    #[must_use]
    pub fn history(&self) -> Option<&History> {
        self.session.as_ref().map(|session| &session.history)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history().is_some_and(History::can_undo)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history().is_some_and(History::can_redo)
    }

    /// Drain buffered events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Invariant violations observed so far.
    #[must_use]
    pub fn violations(&self) -> &[GridError] {
        &self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigSet, Direction, Position};
    use crate::levels::{classic, LevelBuilder};

    fn game(level: LevelBuilder) -> (Game<ConfigSet>, MapId) {
        let (config, map) = level.build();
        let mut game = Game::new(config);
        game.start_game(map).unwrap();
        game.take_events();
        (game, map)
    }

    fn position_of(game: &Game<ConfigSet>, entity_type: crate::core::EntityTypeId) -> Option<Position> {
        game.blocks()
            .find(|block| block.entity_type == entity_type)
            .map(|block| block.position)
    }

    #[test]
    fn test_lifecycle() {
        let (config, map) = LevelBuilder::new(3, 1).place(classic::ROCK, 0, 0).build();
        let mut game = Game::new(config);
        assert_eq!(game.status(), GameStatus::Idle);
        assert!(matches!(game.tick(OperationType::Up), Err(EngineError::NotRunning)));
        assert!(matches!(game.restart_game(), Err(EngineError::NoMapLoaded)));

        game.start_game(map).unwrap();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.map(), Some(map));
        assert_eq!(
            game.take_events(),
            vec![
                GameEvent::GameStarted,
                GameEvent::BlockCreated(*game.block(BlockId::new(0)).unwrap())
            ]
        );

        game.stop_game();
        assert_eq!(game.status(), GameStatus::Idle);
        assert_eq!(game.take_events(), vec![GameEvent::GameStopped]);
        assert!(game.grid().is_none());
        assert!(matches!(game.undo(), Err(EngineError::NotRunning)));

        game.restart_game().unwrap();
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn test_start_unknown_map_changes_nothing() {
        let (config, map) = LevelBuilder::new(2, 1).place(classic::ROCK, 0, 0).build();
        let mut game = Game::new(config);
        game.start_game(map).unwrap();

        assert!(matches!(game.start_game(MapId::new(999)), Err(EngineError::UnknownMap(_))));
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.map(), Some(map));
    }

    #[test]
    fn test_none_operation_is_ignored() {
        let (mut game, _) = game(
            LevelBuilder::new(4, 2)
                .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .place(classic::BABA, 0, 1),
        );
        game.tick(OperationType::Right).unwrap();
        game.undo().unwrap();
        let before = game.grid().cloned();

        let report = game.tick(OperationType::None).unwrap();
        assert_eq!(report.commands, 0);
        assert!(!report.recorded);
        assert_eq!(game.grid().cloned(), before);
        assert!(game.can_redo());
    }

    #[test]
    fn test_wait_still_runs_autonomous_phase() {
        let (mut game, _) = game(
            LevelBuilder::new(4, 2)
                .row(0, &[classic::KEKE_WORD, classic::IS, classic::MOVE])
                .place_facing(classic::KEKE, 0, 1, Direction::Right),
        );
        let report = game.tick(OperationType::Wait).unwrap();
        assert_eq!(report.commands, 1);
        assert_eq!(position_of(&game, classic::KEKE), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_empty_tick_is_not_recorded_but_clears_redo() {
        let (mut game, _) = game(
            LevelBuilder::new(4, 2)
                .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .place(classic::BABA, 0, 1),
        );
        game.tick(OperationType::Right).unwrap();
        game.undo().unwrap();
        assert!(game.can_redo());

        let report = game.tick(OperationType::Wait).unwrap();
        assert!(!report.recorded);
        assert!(!game.can_redo());
        assert!(!game.can_undo());
    }

    #[test]
    fn test_initial_conversion_is_not_undoable() {
        let (mut game, _) = game(
            LevelBuilder::new(3, 2)
                .row(0, &[classic::ROCK_WORD, classic::IS, classic::FLAG_WORD])
                .place(classic::ROCK, 0, 1),
        );
        assert_eq!(position_of(&game, classic::FLAG), Some(Position::new(0, 1)));
        assert!(!game.undo().unwrap());
        assert_eq!(position_of(&game, classic::FLAG), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_has_attribute_tracks_rules() {
        let (mut game, _) = game(
            LevelBuilder::new(3, 4)
                .row(1, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .place(classic::BABA, 2, 2),
        );
        let baba = game
            .blocks()
            .find(|block| block.entity_type == classic::BABA)
            .map(|block| block.id)
            .unwrap();
        assert!(game.has_attribute(baba, AttributeCategory::You));
        assert_eq!(game.rules().len(), 1);

        // Pushing "YOU" up breaks the sentence.
        let report = game.tick(OperationType::Up).unwrap();
        assert_eq!(report.rules, 0);
        assert!(game.rules().is_empty());
        assert!(!game.has_attribute(baba, AttributeCategory::You));
        assert_eq!(position_of(&game, classic::BABA), Some(Position::new(2, 1)));

        let report = game.tick(OperationType::Up).unwrap();
        assert_eq!(report.commands, 0);
    }

    #[test]
    fn test_defeat_destroys_you_and_undo_restores() {
        let (mut game, _) = game(
            LevelBuilder::new(3, 4)
                .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .row(1, &[classic::SKULL_WORD, classic::IS, classic::DEFEAT])
                .place(classic::BABA, 0, 3)
                .place(classic::SKULL, 1, 3),
        );
        game.tick(OperationType::Right).unwrap();

        assert_eq!(position_of(&game, classic::BABA), None);
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.undo().unwrap());
        assert_eq!(position_of(&game, classic::BABA), Some(Position::new(0, 3)));
    }
}
