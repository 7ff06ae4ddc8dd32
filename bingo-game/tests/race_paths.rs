use bingo_game::{
    BoardDetails, GameDetails, GameType, InspectData, RaceDice, RaceError, TileRaceStandings,
    race_seed,
};

const SAMPLE_GAME: &str = include_str!("../../bingo-tester/assets/sample_game.json");

fn race_game() -> GameDetails {
    let mut game = GameDetails::from_json(SAMPLE_GAME).unwrap();
    game.details.game_type = GameType::TileRace;
    game
}

fn run_race(details: &BoardDetails, seed: u64) -> (TileRaceStandings, usize) {
    let final_tile = details.final_tile();
    let mut standings = TileRaceStandings::new(details.team_count);
    let mut dice = RaceDice::new(seed, 6);
    let mut turns = 0;
    while !standings.is_finished() {
        let before = standings.team_positions.clone();
        let rolls = dice.roll_all(details.team_count);
        let movements = standings.take_turn(&rolls, final_tile).unwrap().to_vec();
        turns += 1;

        standings
            .validate(details.team_count, details.tile_count())
            .unwrap();
        assert_eq!(movements.len(), details.team_count);
        for movement in &movements {
            let from = before[movement.team];
            assert!(movement.new_tile <= final_tile);
            assert!(movement.new_tile > from || from == final_tile);
            assert!(movement.tile_movement <= i64::from(movement.roll));
            assert_eq!(movement.win, movement.new_tile == final_tile);
            assert_eq!(standings.team_positions[movement.team], movement.new_tile);
        }
        assert!(turns <= final_tile, "race should end within {final_tile} turns");
    }
    (standings, turns)
}

#[test]
fn seeded_races_finish_with_consistent_movements() {
    let game = race_game();
    for seed in [1_u64, 7, 42, 1337, 0xDEAD_BEEF] {
        let (standings, turns) = run_race(&game.details, seed);
        assert!(turns >= 2, "a 3x3 race needs at least two turns with a d6");
        let winners = standings.winners();
        assert!(!winners.is_empty());
        for winner in winners {
            assert_eq!(standings.team_positions[winner], game.details.final_tile());
        }
    }
}

#[test]
fn same_seed_replays_same_race() {
    let game = race_game();
    let seed = race_seed(&game.details);
    let (first, first_turns) = run_race(&game.details, seed);
    let (second, second_turns) = run_race(&game.details, seed);
    assert_eq!(first, second);
    assert_eq!(first_turns, second_turns);
}

#[test]
fn race_seed_depends_on_teams() {
    let game = race_game();
    let mut renamed = game.details.clone();
    renamed.teams[0].name = "Renamed".to_string();
    assert_ne!(race_seed(&game.details), race_seed(&renamed));
    assert_eq!(race_seed(&game.details), race_seed(&game.details.clone()));
}

#[test]
fn finished_race_stays_finished() {
    let game = race_game();
    let (mut standings, _) = run_race(&game.details, 99);
    let snapshot = standings.clone();
    assert_eq!(
        standings.take_turn(&[1, 1, 1], game.details.final_tile()),
        Err(RaceError::Finished)
    );
    assert_eq!(standings, snapshot);
}

#[test]
fn inspector_shows_teams_parked_on_a_tile() {
    let game = race_game();
    let mut standings = TileRaceStandings::new(3);
    standings
        .take_turn(&[3, 5, 3], game.details.final_tile())
        .unwrap();
    let data = InspectData::open(&game, 3, Some(&standings)).unwrap();
    assert_eq!(data.teams_on_tile.as_slice(), &[0, 2]);
    assert_eq!(data.name, "Barrows Full Set");
    let lone = InspectData::open(&game, 5, Some(&standings)).unwrap();
    assert_eq!(lone.teams_on_tile.as_slice(), &[1]);
}
