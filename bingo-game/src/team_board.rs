//! Per-team progress grids, derived points and standings.
use serde::{Deserialize, Serialize};

use crate::board::Grid;
use crate::numbers::usize_to_u32;
use crate::tile::{TeamTile, Tile};

/// One team's view of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBoard {
    /// Index into the game's team list.
    pub team: usize,
    pub points: i64,
    /// 1-based rank among all teams.
    pub standing: u32,
    pub board: Grid<TeamTile>,
}

impl TeamBoard {
    /// Fresh progress grid with nothing completed.
    #[must_use]
    pub fn blank(team: usize, size: usize) -> Self {
        Self {
            team,
            points: 0,
            standing: 1,
            board: vec![vec![TeamTile::blank(); size]; size],
        }
    }

    #[must_use]
    pub fn tile(&self, row: usize, column: usize) -> Option<&TeamTile> {
        self.board.get(row).and_then(|cells| cells.get(column))
    }

    pub fn tile_mut(&mut self, row: usize, column: usize) -> Option<&mut TeamTile> {
        self.board.get_mut(row).and_then(|cells| cells.get_mut(column))
    }

    /// Sum of tile scores against the static board. Cells missing on either
    /// side contribute nothing.
    #[must_use]
    pub fn compute_points(&self, tiles: &Grid<Tile>) -> i64 {
        self.board
            .iter()
            .zip(tiles)
            .flat_map(|(progress, defs)| progress.iter().zip(defs))
            .map(|(progress, def)| progress.score(def))
            .fold(0i64, i64::saturating_add)
    }

    pub fn recompute_points(&mut self, tiles: &Grid<Tile>) -> i64 {
        self.points = self.compute_points(tiles);
        self.points
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|tile| tile.completed)
            .count()
    }
}

/// Rank boards by points, highest first. Equal points share a standing and
/// the next standing skips (1, 2, 2, 4).
pub fn assign_standings(boards: &mut [TeamBoard]) {
    let points: Vec<i64> = boards.iter().map(|b| b.points).collect();
    for board in boards.iter_mut() {
        let ahead = points.iter().filter(|&&p| p > board.points).count();
        board.standing = usize_to_u32(ahead).saturating_add(1);
    }
}
