//! Tile inspector overlay state.
use serde::{Deserialize, Serialize};

use crate::board::tile_position;
use crate::game::GameDetails;
use crate::race::{TeamsOnTile, TileRaceStandings};
use crate::tile::TeamTile;
use crate::validation::ValidationError;

/// One team's progress on the inspected tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTileCompletion {
    /// Team name.
    pub name: String,
    pub partial_complete: bool,
    pub point_offset: i64,
    pub screenshot: String,
}

impl TeamTileCompletion {
    #[must_use]
    pub fn from_team_tile(name: &str, progress: &TeamTile) -> Self {
        Self {
            name: name.to_string(),
            partial_complete: progress.is_partial(),
            point_offset: progress.custom_value,
            screenshot: progress.screenshot.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectData {
    pub inspecting: bool,
    pub show: bool,
    pub image: String,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub completions: Vec<TeamTileCompletion>,
    #[serde(default)]
    pub teams_on_tile: TeamsOnTile,
    pub tile_number: usize,
}

impl InspectData {
    /// Build the overlay for `tile_number`, listing every team that has
    /// touched the tile and, in race mode, the teams standing on it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TileOutOfRange`] if the tile is not on the board.
    pub fn open(
        game: &GameDetails,
        tile_number: usize,
        race: Option<&TileRaceStandings>,
    ) -> Result<Self, ValidationError> {
        let size = game.details.board_size;
        let out_of_range = ValidationError::TileOutOfRange {
            tile: tile_number,
            tile_count: game.details.tile_count(),
        };
        let (row, column) =
            tile_position(tile_number, size).ok_or_else(|| out_of_range.clone())?;
        let tile = game.tile(row, column).ok_or(out_of_range)?;

        let mut boards: Vec<_> = game.team_boards.iter().flatten().collect();
        boards.sort_by_key(|board| board.team);
        let completions = boards
            .into_iter()
            .filter_map(|board| {
                let progress = board.tile(row, column)?;
                if !progress.is_touched() {
                    return None;
                }
                let name = game.details.team_name(board.team)?;
                Some(TeamTileCompletion::from_team_tile(name, progress))
            })
            .collect();

        Ok(Self {
            inspecting: true,
            show: true,
            image: tile.image.clone(),
            name: tile.name.clone(),
            description: tile.description.clone(),
            points: tile.points,
            completions,
            teams_on_tile: race.map(|r| r.teams_on(tile_number)).unwrap_or_default(),
            tile_number,
        })
    }

    /// Hide the overlay, keeping the last tile's content.
    pub fn close(&mut self) {
        self.inspecting = false;
        self.show = false;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.inspecting && self.show
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardDetails, GameType, Team};
    use crate::team_board::TeamBoard;
    use crate::tile::Tile;
    use chrono::{TimeZone, Utc};

    fn game() -> GameDetails {
        let details = BoardDetails {
            start_time: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap(),
            game_type: GameType::TileRace,
            board_size: 2,
            team_count: 2,
            teams: vec![
                Team {
                    name: "Red".to_string(),
                    members: Vec::new(),
                },
                Team {
                    name: "Blue".to_string(),
                    members: Vec::new(),
                },
            ],
        };
        let board = (0..2)
            .map(|row| {
                (0..2)
                    .map(|column| Tile {
                        image: format!("img/{row}{column}.png"),
                        name: format!("Tile {}", row * 2 + column),
                        description: "Get a drop".to_string(),
                        points: 3,
                    })
                    .collect()
            })
            .collect();
        let mut game = GameDetails::new(details, board).unwrap();
        let mut red = TeamBoard::blank(0, 2);
        red.tile_mut(1, 0).unwrap().completed = true;
        let mut blue = TeamBoard::blank(1, 2);
        blue.tile_mut(1, 0).unwrap().custom_value = 1;
        game.attach_team_boards(vec![blue, red]).unwrap();
        game
    }

    #[test]
    fn open_lists_touched_teams_in_order() {
        let game = game();
        let data = InspectData::open(&game, 2, None).unwrap();
        assert!(data.is_open());
        assert_eq!(data.name, "Tile 2");
        assert_eq!(data.points, 3);
        assert_eq!(data.completions.len(), 2);
        assert_eq!(data.completions[0].name, "Red");
        assert!(!data.completions[0].partial_complete);
        assert_eq!(data.completions[1].name, "Blue");
        assert!(data.completions[1].partial_complete);
        assert_eq!(data.completions[1].point_offset, 1);
        assert!(data.teams_on_tile.is_empty());

        let untouched = InspectData::open(&game, 0, None).unwrap();
        assert!(untouched.completions.is_empty());
    }

    #[test]
    fn open_reports_race_occupants() {
        let game = game();
        let race = TileRaceStandings {
            team_positions: vec![3, 3],
            movements: Vec::new(),
        };
        let data = InspectData::open(&game, 3, Some(&race)).unwrap();
        assert_eq!(data.teams_on_tile.as_slice(), &[0, 1]);
        assert_eq!(data.tile_number, 3);
    }

    #[test]
    fn open_rejects_off_board_tiles_and_close_hides() {
        let game = game();
        assert_eq!(
            InspectData::open(&game, 4, None),
            Err(ValidationError::TileOutOfRange {
                tile: 4,
                tile_count: 4
            })
        );
        let mut data = InspectData::open(&game, 1, None).unwrap();
        data.close();
        assert!(!data.is_open());
        assert_eq!(data.tile_number, 1);
        assert!(!InspectData::default().is_open());
    }

    #[test]
    fn wire_names_match_overlay_fields() {
        let data = InspectData::open(&game(), 2, None).unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("teamsOnTile").is_some());
        assert!(value.get("tileNumber").is_some());
        assert_eq!(value["completions"][1]["partialComplete"], true);
        assert_eq!(value["completions"][1]["pointOffset"], 1);
    }
}
