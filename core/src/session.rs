use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, instrument, warn};

use minesweeper_common::{
    events::{Action, CellUpdate, GameEvent},
    models::{CellView, GameConfig, GameState, Pos},
};

use crate::board::Board;
use crate::grid::in_bounds;
use crate::place::place_mines_first_safe;
use crate::reveal::{self, RevealResult, chord_from, expose_mines, reveal_from};
use crate::win::is_won;

/// A single game from config to win or loss. Owns the board and the RNG,
/// tracks the state machine and the flag counter, and defers mine placement
/// until the first reveal so that the first click never loses.
///
/// Out-of-range positions and actions on a finished game are ignored.
pub struct GameSession {
    board: Board,
    config: GameConfig,
    state: GameState,
    mines_placed: bool,
    flags_placed: usize,
    exposed: Vec<Pos>,
    rng: SmallRng,
}

impl GameSession {
    #[instrument(level = "trace")]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Same as [`GameSession::new`] but with a deterministic mine layout for
    /// a given seed.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: SmallRng) -> Self {
        let config = config.clamped();
        info!(
            "Creating new game: {}x{} with {} mines",
            config.rows, config.cols, config.mines
        );
        Self {
            board: Board::new(config.rows, config.cols),
            config,
            state: GameState::Ready,
            mines_placed: false,
            flags_placed: 0,
            exposed: Vec::new(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    /// Mines minus flags. Goes negative when the player overflags.
    pub fn mines_remaining(&self) -> i64 {
        self.config.mines as i64 - self.flags_placed as i64
    }

    /// Mines uncovered by the loss, beyond the one that was hit. Empty while
    /// the game is still going.
    pub fn exposed_mines(&self) -> &[Pos] {
        &self.exposed
    }

    pub fn snapshot(&self) -> Vec<Vec<CellView>> {
        self.board.snapshot()
    }

    pub fn init_event(&self) -> GameEvent {
        GameEvent::Initialized {
            rows: self.config.rows,
            cols: self.config.cols,
            mines: self.config.mines,
            board: self.board.snapshot(),
        }
    }

    /// Runs one player action and reports the outcome as an event.
    pub fn apply(&mut self, action: Action) -> GameEvent {
        match action {
            Action::Reveal { pos } => {
                let result = self.reveal(pos);
                self.update_event(&result)
            }
            Action::Chord { pos } => {
                let result = self.chord(pos);
                self.update_event(&result)
            }
            Action::Flag { pos } => {
                let updates = if self.toggle_flag(pos) {
                    vec![self.cell_update(pos)]
                } else {
                    Vec::new()
                };
                GameEvent::Updated {
                    updates,
                    state: self.state,
                }
            }
            Action::Reset { config } => {
                self.reset(config);
                self.init_event()
            }
        }
    }

    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn reveal(&mut self, pos: Pos) -> RevealResult {
        if !in_bounds(pos.row, pos.col, self.board.rows(), self.board.cols()) {
            warn!("Invalid reveal position: ({}, {})", pos.row, pos.col);
            return RevealResult::default();
        }

        if self.state.is_terminal() {
            debug!(
                "Ignoring reveal action on finished game at ({}, {})",
                pos.row, pos.col
            );
            return RevealResult::default();
        }

        if self.board.cell(pos).flagged {
            debug!("Ignoring reveal on flagged cell ({}, {})", pos.row, pos.col);
            return RevealResult::default();
        }

        self.ensure_mines_placed(pos);

        let result = reveal_from(&mut self.board, pos);
        self.finish_action(pos, &result);
        result
    }

    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn chord(&mut self, pos: Pos) -> RevealResult {
        if !in_bounds(pos.row, pos.col, self.board.rows(), self.board.cols()) {
            warn!("Invalid chord position: ({}, {})", pos.row, pos.col);
            return RevealResult::default();
        }

        if self.state.is_terminal() {
            debug!(
                "Ignoring chord action on finished game at ({}, {})",
                pos.row, pos.col
            );
            return RevealResult::default();
        }

        let result = chord_from(&mut self.board, pos);
        self.finish_action(pos, &result);
        result
    }

    #[instrument(level = "trace", skip(self), fields(row = pos.row, col = pos.col))]
    pub fn toggle_flag(&mut self, pos: Pos) -> bool {
        if !in_bounds(pos.row, pos.col, self.board.rows(), self.board.cols()) {
            warn!("Invalid flag position: ({}, {})", pos.row, pos.col);
            return false;
        }

        if self.state.is_terminal() {
            debug!(
                "Ignoring flag action on finished game at ({}, {})",
                pos.row, pos.col
            );
            return false;
        }

        if !reveal::toggle_flag(&mut self.board, pos) {
            debug!(
                "Ignoring flag action on revealed cell ({}, {})",
                pos.row, pos.col
            );
            return false;
        }

        if self.board.cell(pos).flagged {
            self.flags_placed += 1;
            debug!("Cell ({}, {}) flagged", pos.row, pos.col);
        } else {
            self.flags_placed -= 1;
            debug!("Cell ({}, {}) unflagged", pos.row, pos.col);
        }
        true
    }

    #[instrument(level = "trace", skip(self))]
    pub fn reset(&mut self, config: GameConfig) {
        let config = config.clamped();
        info!(
            "Restarting game with new parameters: {}x{} with {} mines",
            config.rows, config.cols, config.mines
        );
        self.board = Board::new(config.rows, config.cols);
        self.config = config;
        self.state = GameState::Ready;
        self.mines_placed = false;
        self.flags_placed = 0;
        self.exposed.clear();
    }

    fn ensure_mines_placed(&mut self, safe: Pos) {
        if self.mines_placed {
            return;
        }

        let placed =
            place_mines_first_safe(&mut self.board, self.config.mines, safe, &mut self.rng);
        self.mines_placed = true;
        debug!(
            "Placed {} mines after first reveal at ({}, {})",
            placed, safe.row, safe.col
        );
    }

    fn finish_action(&mut self, pos: Pos, result: &RevealResult) {
        if result.hit_mine {
            warn!("Player hit mine at ({}, {}) - game over!", pos.row, pos.col);
            self.exposed = expose_mines(&mut self.board);
            self.state = GameState::Lost;
            info!("Game ended with loss, exposed {} more mines", self.exposed.len());
            return;
        }

        if result.changed.is_empty() {
            return;
        }

        if self.state == GameState::Ready {
            self.state = GameState::Running;
        }

        if is_won(&self.board, self.board.mine_count()) {
            self.state = GameState::Won;
            info!("Game won! All safe cells revealed.");
        } else {
            debug!("Revealed {} cells, game continues", result.changed.len());
        }
    }

    fn cell_update(&self, pos: Pos) -> CellUpdate {
        CellUpdate {
            pos,
            view: self.board.cell(pos).into(),
        }
    }

    fn update_event(&self, result: &RevealResult) -> GameEvent {
        let mut updates: Vec<CellUpdate> = result
            .changed
            .iter()
            .map(|&pos| self.cell_update(pos))
            .collect();
        if result.hit_mine {
            updates.extend(self.exposed.iter().map(|&pos| self.cell_update(pos)));
        }

        GameEvent::Updated {
            updates,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweeper_common::models::MAX_COLS;

    fn pos(row: usize, col: usize) -> Pos {
        Pos { row, col }
    }

    fn small_config() -> GameConfig {
        GameConfig {
            rows: 5,
            cols: 5,
            mines: 8,
        }
    }

    // A sparse board can be cleared by a single lucky flood; this density
    // keeps the game running after the first reveal.
    fn dense_config() -> GameConfig {
        GameConfig {
            rows: 9,
            cols: 9,
            mines: 40,
        }
    }

    fn find_mine(session: &GameSession) -> Pos {
        session
            .board()
            .positions()
            .find(|&p| session.board().cell(p).is_mine)
            .unwrap()
    }

    fn neighbors_of(session: &GameSession, target: Pos) -> Vec<Pos> {
        crate::grid::neighbors(
            target.row,
            target.col,
            session.board().rows(),
            session.board().cols(),
        )
    }

    #[test]
    fn new_session_is_ready_and_unmined() {
        let session = GameSession::with_seed(GameConfig::default(), 1);

        assert_eq!(session.state(), GameState::Ready);
        assert!(!session.mines_placed());
        assert_eq!(session.board().mine_count(), 0);
        assert!(
            session
                .snapshot()
                .iter()
                .flatten()
                .all(|&view| view == CellView::Hidden)
        );
    }

    #[test]
    fn config_is_clamped_on_creation() {
        let session = GameSession::with_seed(
            GameConfig {
                rows: 3,
                cols: 99,
                mines: 0,
            },
            1,
        );

        assert_eq!(
            session.config(),
            GameConfig {
                rows: 5,
                cols: MAX_COLS,
                mines: 1
            }
        );
        assert_eq!(session.board().rows(), 5);
        assert_eq!(session.board().cols(), MAX_COLS);
    }

    #[test]
    fn first_reveal_places_mines_and_never_loses() {
        for seed in 0..10 {
            let mut session = GameSession::with_seed(GameConfig::default(), seed);
            let result = session.reveal(pos(4, 4));

            assert!(!result.hit_mine, "seed {seed}");
            assert!(!result.changed.is_empty());
            assert!(session.mines_placed());
            assert_eq!(session.board().mine_count(), 10);
            assert_ne!(session.state(), GameState::Ready);
            assert_ne!(session.state(), GameState::Lost);

            for row in 3..=5 {
                for col in 3..=5 {
                    assert!(!session.board().cell(pos(row, col)).is_mine, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn out_of_bounds_actions_change_nothing() {
        let mut session = GameSession::with_seed(GameConfig::default(), 3);

        assert!(session.reveal(pos(9, 0)).is_empty());
        assert!(session.chord(pos(0, 99)).is_empty());
        assert!(!session.toggle_flag(pos(100, 100)));
        assert_eq!(session.state(), GameState::Ready);
        assert!(!session.mines_placed());
    }

    #[test]
    fn reveal_on_flagged_cell_does_not_place_mines() {
        let mut session = GameSession::with_seed(GameConfig::default(), 4);

        assert!(session.toggle_flag(pos(4, 4)));
        assert!(session.reveal(pos(4, 4)).is_empty());
        assert!(!session.mines_placed());
        assert_eq!(session.state(), GameState::Ready);
    }

    #[test]
    fn flag_counter_follows_toggles() {
        let mut session = GameSession::with_seed(GameConfig::default(), 5);

        assert!(session.toggle_flag(pos(0, 0)));
        assert_eq!(session.flags_placed(), 1);
        assert_eq!(session.mines_remaining(), 9);

        assert!(session.toggle_flag(pos(0, 0)));
        assert_eq!(session.flags_placed(), 0);
        assert_eq!(session.mines_remaining(), 10);
    }

    #[test]
    fn flagging_a_revealed_cell_is_refused() {
        let mut session = GameSession::with_seed(GameConfig::default(), 6);
        session.reveal(pos(4, 4));

        assert!(!session.toggle_flag(pos(4, 4)));
        assert_eq!(session.flags_placed(), 0);
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut session = GameSession::with_seed(small_config(), 8);
        session.reveal(pos(2, 2));

        let all: Vec<Pos> = session.board().positions().collect();
        for p in all {
            if !session.board().cell(p).is_mine {
                session.reveal(p);
            }
        }

        assert_eq!(session.state(), GameState::Won);
        assert_eq!(session.board().revealed_count(), 17);
        assert!(session.exposed_mines().is_empty());

        let mine = find_mine(&session);
        assert!(!session.board().cell(mine).revealed);

        // finished games ignore every further action
        let before = session.board().clone();
        assert!(session.reveal(mine).is_empty());
        assert!(session.chord(pos(2, 2)).is_empty());
        assert!(!session.toggle_flag(mine));
        assert_eq!(*session.board(), before);
        assert_eq!(session.state(), GameState::Won);
    }

    #[test]
    fn hitting_a_mine_loses_and_exposes_the_rest() {
        let mut session = GameSession::with_seed(dense_config(), 9);
        session.reveal(pos(4, 4));
        assert_eq!(session.state(), GameState::Running);

        let mine = find_mine(&session);
        let result = session.reveal(mine);

        assert!(result.hit_mine);
        assert_eq!(result.changed, vec![mine]);
        assert_eq!(session.state(), GameState::Lost);
        assert_eq!(session.exposed_mines().len(), 39);

        let board = session.board();
        let revealed_mines = board
            .positions()
            .filter(|&p| board.cell(p).is_mine && board.cell(p).revealed)
            .count();
        assert_eq!(revealed_mines, 40);
    }

    #[test]
    fn finished_game_is_frozen() {
        let mut session = GameSession::with_seed(dense_config(), 10);
        session.reveal(pos(4, 4));
        let mine = find_mine(&session);
        session.reveal(mine);
        assert_eq!(session.state(), GameState::Lost);

        let before = session.board().clone();
        assert!(session.reveal(pos(0, 0)).is_empty());
        assert!(session.chord(pos(0, 0)).is_empty());
        assert!(!session.toggle_flag(pos(0, 0)));
        assert_eq!(*session.board(), before);
        assert_eq!(session.state(), GameState::Lost);
    }

    #[test]
    fn noop_reveal_keeps_the_state() {
        let mut session = GameSession::with_seed(GameConfig::default(), 11);
        session.reveal(pos(4, 4));
        let state = session.state();

        assert!(session.reveal(pos(4, 4)).is_empty());
        assert_eq!(session.state(), state);
    }

    #[test]
    fn chord_after_correct_flags_opens_the_rest_around_a_number() {
        let mut session = GameSession::with_seed(dense_config(), 12);
        let first = session.reveal(pos(4, 4));
        assert_eq!(session.state(), GameState::Running);

        // any opened game has at least one revealed numbered cell
        let target = first
            .changed
            .iter()
            .copied()
            .find(|&p| session.board().cell(p).adjacent > 0)
            .unwrap();

        // chording with no flags down is refused
        assert!(session.chord(target).is_empty());

        let mined: Vec<Pos> = neighbors_of(&session, target)
            .into_iter()
            .filter(|&p| session.board().cell(p).is_mine)
            .collect();
        for &p in &mined {
            assert!(session.toggle_flag(p));
        }

        let result = session.chord(target);
        assert!(!result.hit_mine);
        assert_ne!(session.state(), GameState::Lost);
        for p in neighbors_of(&session, target) {
            let cell = session.board().cell(p);
            assert!(cell.revealed || cell.flagged);
        }
    }

    #[test]
    fn reset_returns_to_a_fresh_ready_board() {
        let mut session = GameSession::with_seed(small_config(), 13);
        session.toggle_flag(pos(0, 0));
        session.reveal(pos(2, 2));
        assert_eq!(session.flags_placed(), 1);
        session.reset(GameConfig::default());

        assert_eq!(session.state(), GameState::Ready);
        assert!(!session.mines_placed());
        assert_eq!(session.flags_placed(), 0);
        assert_eq!(session.board().rows(), 9);
        assert!(
            session
                .snapshot()
                .iter()
                .flatten()
                .all(|&view| view == CellView::Hidden)
        );
    }

    #[test]
    fn same_seed_plays_the_same_game() {
        let mut first = GameSession::with_seed(GameConfig::default(), 14);
        let mut second = GameSession::with_seed(GameConfig::default(), 14);

        for session in [&mut first, &mut second] {
            session.reveal(pos(4, 4));
            session.reveal(pos(0, 0));
            session.reveal(pos(8, 8));
        }

        assert_eq!(*first.board(), *second.board());
        assert_eq!(first.state(), second.state());
    }

    #[test]
    fn apply_turns_actions_into_events() {
        let mut session = GameSession::with_seed(GameConfig::default(), 15);

        let event = session.apply(Action::Flag { pos: pos(0, 0) });
        assert_eq!(
            event,
            GameEvent::Updated {
                updates: vec![CellUpdate {
                    pos: pos(0, 0),
                    view: CellView::Flagged,
                }],
                state: GameState::Ready,
            }
        );
        session.apply(Action::Flag { pos: pos(0, 0) });

        let event = session.apply(Action::Reveal { pos: pos(4, 4) });
        let GameEvent::Updated { updates, state } = event else {
            panic!("reveal must produce an update event");
        };
        assert!(!updates.is_empty());
        assert_ne!(state, GameState::Lost);
        assert!(
            updates
                .iter()
                .all(|update| matches!(update.view, CellView::Revealed { .. }))
        );

        let event = session.apply(Action::Reset {
            config: GameConfig::default(),
        });
        let GameEvent::Initialized { rows, cols, mines, board } = event else {
            panic!("reset must produce an init event");
        };
        assert_eq!((rows, cols, mines), (9, 9, 10));
        assert_eq!(board.len(), 9);
    }

    #[test]
    fn losing_update_carries_the_whole_minefield() {
        let mut session = GameSession::with_seed(dense_config(), 16);
        session.reveal(pos(4, 4));
        assert_eq!(session.state(), GameState::Running);
        let mine = find_mine(&session);

        let event = session.apply(Action::Reveal { pos: mine });
        let GameEvent::Updated { updates, state } = event else {
            panic!("reveal must produce an update event");
        };

        assert_eq!(state, GameState::Lost);
        assert_eq!(updates.len(), 40);
        assert!(updates.iter().all(|update| update.view == CellView::Mine));
    }
}
