//! Player-driven and autonomous movement phases.
//!
//! Both phases work line by line through [`LineResolver`]. Lines on the same
//! axis never interact, so every command of one phase is computed from the
//! grid as it stood when the phase began; the caller performs them before
//! starting the next phase.

use tracing::trace;

use crate::attributes::AttributeTable;
use crate::commands::Command;
use crate::core::{AttributeCategory, Axis, Direction, Position};
use crate::grid::{Block, Catalog, Grid};

use super::line::{LineResolver, Sense};

/// Computes move commands for one phase at a time.
///
/// Owns the per-line scratch buffers so a tick allocates them once.
#[derive(Clone, Debug, Default)]
pub struct MovementResolver {
    line: LineResolver,
    movers: Vec<usize>,
    moves: Vec<(Block, Sense)>,
}

impl MovementResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves for every You block stepping in `direction`.
    ///
    /// Push chains ahead and Pull chains behind are resolved in one shared
    /// pass per line, so no block receives more than one move.
    pub fn player_moves(
        &mut self,
        grid: &Grid,
        catalog: &Catalog,
        table: &AttributeTable,
        direction: Direction,
    ) -> Vec<Command> {
        let axis = direction.axis();
        let sense = Sense::of(direction);
        let mut commands = Vec::new();

        for index in 0..line_count(grid, axis) {
            self.line.load(grid, catalog, table, line_positions(grid, axis, index));
            if self.line.is_empty() {
                continue;
            }

            let mut any = false;
            for cell in 0..self.line.cell_count() {
                for entry in self.line.cell(cell) {
                    if self.line.has(entry, AttributeCategory::You) {
                        self.line.mark_mover(cell, entry, sense);
                        any = true;
                    }
                }
            }
            if !any {
                continue;
            }

            self.line.resolve();
            self.emit_moves(axis, &mut commands);
        }

        trace!(%direction, moves = commands.len(), "player phase");
        commands
    }

    /// Moves and bounces for every Move block facing along `axis`.
    ///
    /// A Move block advances one cell along its facing. If it cannot, it
    /// turns around instead and tries the new facing next tick.
    pub fn autonomous_moves(
        &mut self,
        grid: &Grid,
        catalog: &Catalog,
        table: &AttributeTable,
        axis: Axis,
    ) -> Vec<Command> {
        let mut commands = Vec::new();

        for index in 0..line_count(grid, axis) {
            self.line.load(grid, catalog, table, line_positions(grid, axis, index));
            if self.line.is_empty() {
                continue;
            }

            self.movers.clear();
            for cell in 0..self.line.cell_count() {
                for entry in self.line.cell(cell) {
                    let facing = self.line.block(entry).direction;
                    if self.line.has(entry, AttributeCategory::Move) && facing.axis() == axis {
                        self.line.mark_mover(cell, entry, Sense::of(facing));
                        self.movers.push(entry);
                    }
                }
            }
            if self.movers.is_empty() {
                continue;
            }

            self.line.resolve();
            self.emit_moves(axis, &mut commands);

            for &entry in &self.movers {
                if !self.line.is_moving(entry) {
                    let block = self.line.block(entry);
                    commands.push(Command::turn(block, block.direction.opposite()));
                }
            }
        }

        trace!(?axis, commands = commands.len(), "autonomous phase");
        commands
    }

    fn emit_moves(&mut self, axis: Axis, commands: &mut Vec<Command>) {
        self.moves.clear();
        self.line.collect_moves(&mut self.moves);
        commands.extend(
            self.moves
                .iter()
                .map(|(block, sense)| Command::step(block, sense.direction(axis))),
        );
    }
}

fn line_count(grid: &Grid, axis: Axis) -> i32 {
    match axis {
        Axis::Horizontal => grid.height() as i32,
        Axis::Vertical => grid.width() as i32,
    }
}

/// Positions of row or column `index`, negative end first.
fn line_positions(grid: &Grid, axis: Axis, index: i32) -> impl Iterator<Item = Position> {
    let length = match axis {
        Axis::Horizontal => grid.width() as i32,
        Axis::Vertical => grid.height() as i32,
    };
    (0..length).map(move |offset| match axis {
        Axis::Horizontal => Position::new(offset, index),
        Axis::Vertical => Position::new(index, offset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{classic, LevelBuilder};
    use crate::rules::RuleAnalyzer;

    struct Fixture {
        grid: Grid,
        catalog: Catalog,
        table: AttributeTable,
    }

    fn fixture(level: LevelBuilder) -> Fixture {
        let (grid, catalog) = level.build_grid().unwrap();
        let mut table = AttributeTable::new();
        table.refresh(&catalog);
        RuleAnalyzer::new().derive(&grid, &catalog).apply_persistent(&mut table);
        Fixture { grid, catalog, table }
    }

    fn targets(commands: &[Command]) -> Vec<Position> {
        commands
            .iter()
            .filter_map(|command| match *command {
                Command::Move { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_player_moves_every_you_block() {
        let f = fixture(
            LevelBuilder::new(4, 4)
                .row(3, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .place(classic::BABA, 0, 0)
                .place(classic::BABA, 2, 1),
        );
        let commands = MovementResolver::new().player_moves(&f.grid, &f.catalog, &f.table, Direction::Down);
        assert_eq!(targets(&commands), vec![Position::new(0, 1), Position::new(2, 2)]);
    }

    /// True if no block appears in more than one command.
    fn each_block_once(commands: &[Command]) -> bool {
        let mut blocks: Vec<_> = commands.iter().map(Command::block).collect();
        blocks.sort_unstable();
        blocks.dedup();
        blocks.len() == commands.len()
    }

    #[test]
    fn test_two_pushers_move_shared_rock_once() {
        let f = fixture(
            LevelBuilder::new(4, 3)
                .place(classic::BABA, 0, 0)
                .place(classic::BABA, 1, 0)
                .place(classic::ROCK, 2, 0)
                .row(1, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .row(2, &[classic::ROCK_WORD, classic::IS, classic::PUSH]),
        );
        let commands = MovementResolver::new().player_moves(&f.grid, &f.catalog, &f.table, Direction::Right);
        assert_eq!(commands.len(), 3);
        assert!(each_block_once(&commands));
        assert_eq!(
            targets(&commands),
            vec![Position::new(3, 0), Position::new(2, 0), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_overlapping_push_chains_move_each_block_once() {
        // Baba is also Push, so the back Baba's chain covers the front one.
        let f = fixture(
            LevelBuilder::new(4, 4)
                .place(classic::BABA, 0, 0)
                .place(classic::BABA, 1, 0)
                .place(classic::ROCK, 2, 0)
                .row(1, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .row(2, &[classic::ROCK_WORD, classic::IS, classic::PUSH])
                .row(3, &[classic::BABA_WORD, classic::IS, classic::PUSH]),
        );
        let commands = MovementResolver::new().player_moves(&f.grid, &f.catalog, &f.table, Direction::Right);
        assert_eq!(commands.len(), 3);
        assert!(each_block_once(&commands));
    }

    #[test]
    fn test_stacked_pullers_move_pulled_rock_once() {
        let f = fixture(
            LevelBuilder::new(5, 3)
                .place(classic::ROCK, 0, 0)
                .place(classic::BABA, 1, 0)
                .place(classic::BABA, 1, 0)
                .row(1, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .row(2, &[classic::ROCK_WORD, classic::IS, classic::PULL]),
        );
        let commands = MovementResolver::new().player_moves(&f.grid, &f.catalog, &f.table, Direction::Right);
        assert_eq!(commands.len(), 3);
        assert!(each_block_once(&commands));
        assert_eq!(
            targets(&commands),
            vec![Position::new(2, 0), Position::new(2, 0), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_player_push_into_edge_is_blocked() {
        let f = fixture(
            LevelBuilder::new(3, 3)
                .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
                .place(classic::BABA, 0, 1),
        );
        let mut resolver = MovementResolver::new();

        // The word above Baba would be pushed off the top edge.
        let up = resolver.player_moves(&f.grid, &f.catalog, &f.table, Direction::Up);
        assert!(up.is_empty());

        let down = resolver.player_moves(&f.grid, &f.catalog, &f.table, Direction::Down);
        assert_eq!(targets(&down), vec![Position::new(0, 2)]);
    }

    #[test]
    fn test_move_block_advances_along_facing() {
        let f = fixture(
            LevelBuilder::new(4, 2)
                .row(1, &[classic::KEKE_WORD, classic::IS, classic::MOVE])
                .place_facing(classic::KEKE, 0, 0, Direction::Right),
        );
        let mut resolver = MovementResolver::new();
        assert!(resolver
            .autonomous_moves(&f.grid, &f.catalog, &f.table, Axis::Vertical)
            .is_empty());

        let commands = resolver.autonomous_moves(&f.grid, &f.catalog, &f.table, Axis::Horizontal);
        assert_eq!(targets(&commands), vec![Position::new(1, 0)]);
    }

    #[test]
    fn test_blocked_move_block_turns_around() {
        let f = fixture(
            LevelBuilder::new(4, 2)
                .row(1, &[classic::KEKE_WORD, classic::IS, classic::MOVE])
                .place_facing(classic::KEKE, 3, 0, Direction::Right),
        );
        let commands =
            MovementResolver::new().autonomous_moves(&f.grid, &f.catalog, &f.table, Axis::Horizontal);
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::Turn { from: Direction::Right, to: Direction::Left, .. }
        ));
    }
}
