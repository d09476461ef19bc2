use std::collections::{HashMap, HashSet, VecDeque};

use minesweeper_common::models::Pos;

use crate::board::Board;
use crate::grid::orthogonal_neighbors;

/// Groups revealed positions by their adjacent-mine value, splitting each
/// value group into 4-connected components. Connectivity only counts cells in
/// `positions`; the rest of the board never bridges two components. Mines in
/// the input are skipped. Components come out in input order, as does their
/// membership, so output is deterministic for a given input.
///
/// This is a presentation aid for animating a freshly opened region and has
/// no effect on game rules.
pub fn cluster_by_value(positions: &[Pos], board: &Board) -> HashMap<u8, Vec<Vec<Pos>>> {
    let mut by_value: HashMap<u8, Vec<Pos>> = HashMap::new();
    for &pos in positions {
        let cell = board.cell(pos);
        if cell.is_mine {
            continue;
        }
        by_value.entry(cell.adjacent).or_default().push(pos);
    }

    let mut clusters: HashMap<u8, Vec<Vec<Pos>>> = HashMap::new();
    for (value, group) in by_value {
        let members: HashSet<Pos> = group.iter().copied().collect();
        let mut visited: HashSet<Pos> = HashSet::new();
        let mut components = Vec::new();

        for &seed in &group {
            if visited.contains(&seed) {
                continue;
            }

            visited.insert(seed);
            let mut component = vec![seed];
            let mut queue = VecDeque::from([seed]);

            while let Some(pos) = queue.pop_front() {
                for neighbor in orthogonal_neighbors(pos.row, pos.col, board.rows(), board.cols())
                {
                    if members.contains(&neighbor) && visited.insert(neighbor) {
                        component.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }

            components.push(component);
        }

        clusters.insert(value, components);
    }

    clusters
}
