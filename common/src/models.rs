use serde::{Deserialize, Serialize};

pub const MIN_ROWS: usize = 5;
pub const MAX_ROWS: usize = 50;
pub const MIN_COLS: usize = 5;
pub const MAX_COLS: usize = 60;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum CellView {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Ready,
    Running,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            mines: 10,
        }
    }
}

impl GameConfig {
    /// Forces the config into the supported range, capping mines at half the
    /// board area.
    pub fn clamped(self) -> Self {
        let rows = self.rows.clamp(MIN_ROWS, MAX_ROWS);
        let cols = self.cols.clamp(MIN_COLS, MAX_COLS);
        let mines = self.mines.clamp(1, rows * cols / 2);
        Self { rows, cols, mines }
    }
}
