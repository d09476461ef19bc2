use serde::{Deserialize, Serialize};

use crate::models::{CellView, GameConfig, GameState, Pos};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "action")]
pub enum Action {
    #[serde(rename = "reveal")]
    Reveal { pos: Pos },
    #[serde(rename = "chord")]
    Chord { pos: Pos },
    #[serde(rename = "flag")]
    Flag { pos: Pos },
    #[serde(rename = "reset")]
    Reset { config: GameConfig },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub pos: Pos,
    pub view: CellView,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameEvent {
    #[serde(rename = "initialized")]
    Initialized {
        rows: usize,
        cols: usize,
        mines: usize,
        board: Vec<Vec<CellView>>,
    },
    #[serde(rename = "updated")]
    Updated {
        updates: Vec<CellUpdate>,
        state: GameState,
    },
}
