use anyhow::{Context, Result, bail, ensure};
use bingo_game::{
    GameDetails, InspectData, MembersStorage, RaceDice, TileRaceStandings, grid_matches,
    tile_position,
};

use super::{ScenarioCtx, TestScenario};

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario {
            key: "structure",
            name: "Board Structure",
            description: "Board, team and team-board dimensions are consistent",
            seeded: false,
            check: structure_expectation,
        },
        TestScenario {
            key: "scoring",
            name: "Tile Scoring",
            description: "Stored team points equal the sum of tile scores",
            seeded: false,
            check: scoring_expectation,
        },
        TestScenario {
            key: "standings",
            name: "Team Standings",
            description: "Standings follow points with shared ranks on ties",
            seeded: false,
            check: standings_expectation,
        },
        TestScenario {
            key: "inspect",
            name: "Tile Inspector",
            description: "Every tile opens in the inspector with the right completions",
            seeded: false,
            check: inspect_expectation,
        },
        TestScenario {
            key: "session",
            name: "Session Loading",
            description: "Team boards and roster attach exactly once",
            seeded: false,
            check: session_expectation,
        },
        TestScenario {
            key: "roster",
            name: "Roster Import",
            description: "Provider memberships cover every team member",
            seeded: false,
            check: roster_expectation,
        },
        TestScenario {
            key: "race",
            name: "Tile Race Simulation",
            description: "Seeded races finish with valid movements",
            seeded: true,
            check: race_expectation,
        },
        TestScenario {
            key: "roundtrip",
            name: "Serialization Round Trip",
            description: "Game, race and inspector state survive JSON round trips",
            seeded: true,
            check: roundtrip_expectation,
        },
    ]
}

fn structure_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let game = &ctx.assets.game;
    game.validate().context("game failed validation")?;
    let size = game.details.board_size;
    ensure!(
        grid_matches(&game.board, size),
        "board is not {size}x{size}"
    );
    ensure!(
        game.details.teams.len() == game.details.team_count,
        "{} teams listed for team count {}",
        game.details.teams.len(),
        game.details.team_count
    );
    for board in game.team_boards.iter().flatten() {
        ensure!(
            grid_matches(&board.board, size),
            "team {} board is not {size}x{size}",
            board.team
        );
    }
    Ok(())
}

fn scoring_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let game = &ctx.assets.game;
    let size = game.details.board_size;
    for board in game.team_boards.iter().flatten() {
        let mut via_full_tiles = 0i64;
        for tile in 0..game.tile_count() {
            let (row, column) = tile_position(tile, size).context("tile off the board")?;
            let full = game
                .full_tile(board.team, row, column)
                .with_context(|| format!("team {} missing tile {tile}", board.team))?;
            via_full_tiles += full.score();
        }
        let computed = board.compute_points(&game.board);
        ensure!(
            computed == via_full_tiles,
            "team {} grid sum {computed} differs from tile sum {via_full_tiles}",
            board.team
        );
        ensure!(
            board.points == computed,
            "team {} stores {} points, tiles add up to {computed}",
            board.team,
            board.points
        );
    }
    Ok(())
}

fn standings_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let game = &ctx.assets.game;
    let Some(boards) = game.team_boards.as_ref() else {
        return Ok(());
    };
    for a in boards {
        ensure!(a.standing >= 1, "team {} has standing 0", a.team);
        for b in boards {
            let consistent = match a.points.cmp(&b.points) {
                std::cmp::Ordering::Greater => a.standing < b.standing,
                std::cmp::Ordering::Equal => a.standing == b.standing,
                std::cmp::Ordering::Less => a.standing > b.standing,
            };
            ensure!(
                consistent,
                "team {} ({} pts, #{}) vs team {} ({} pts, #{})",
                a.team,
                a.points,
                a.standing,
                b.team,
                b.points,
                b.standing
            );
        }
    }

    let mut recomputed = game.clone();
    recomputed.recompute_scores();
    ensure!(
        recomputed.leaderboard() == game.leaderboard(),
        "stored standings differ from recomputed standings"
    );
    Ok(())
}

fn inspect_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let game = &ctx.assets.game;
    for tile_number in 0..game.tile_count() {
        let mut data = InspectData::open(game, tile_number, None)?;
        let tile = game
            .tile_at(tile_number)
            .with_context(|| format!("tile {tile_number} missing"))?;
        ensure!(data.is_open(), "tile {tile_number} did not open");
        ensure!(data.points == tile.points, "tile {tile_number} points differ");
        let (row, column) = tile_position(tile_number, game.details.board_size)
            .context("tile off the board")?;
        let touched = game
            .team_boards
            .iter()
            .flatten()
            .filter_map(|board| board.tile(row, column))
            .filter(|progress| progress.is_touched())
            .count();
        ensure!(
            data.completions.len() == touched,
            "tile {tile_number} lists {} completions, {touched} teams touched it",
            data.completions.len()
        );
        data.close();
        ensure!(!data.is_open(), "tile {tile_number} did not close");
    }
    if InspectData::open(game, game.tile_count(), None).is_ok() {
        bail!("inspector opened a tile past the end of the board");
    }
    Ok(())
}

fn session_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut game = ctx.assets.game.clone();
    game.user_data = None;
    let boards = game.team_boards.take();

    if let Some(boards) = boards {
        game.attach_team_boards(boards.clone())
            .context("first team board attach failed")?;
        ensure!(
            game.attach_team_boards(boards).is_err(),
            "team boards attached twice"
        );
    }

    let roster = MembersStorage::from_wom(&ctx.assets.memberships, game.details.start_time);
    game.attach_user_data(roster.clone())
        .context("first roster attach failed")?;
    ensure!(
        game.attach_user_data(roster).is_err(),
        "roster attached twice"
    );
    game.validate().context("game invalid after loading")?;
    Ok(())
}

fn roster_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let game = &ctx.assets.game;
    let roster = MembersStorage::from_wom(&ctx.assets.memberships, game.details.start_time);
    ensure!(!roster.is_empty(), "roster is empty");
    ensure!(
        !roster.is_stale(roster.updated, &ctx.assets.config.roster),
        "fresh roster reported stale"
    );

    let missing: Vec<String> = game
        .details
        .teams
        .iter()
        .flat_map(|team| {
            team.members
                .iter()
                .filter(|name| roster.find_by_name(name).is_none())
                .map(move |name| format!("{name} ({})", team.name))
        })
        .collect();
    ensure!(
        missing.is_empty(),
        "team members missing from roster: {}",
        missing.join(", ")
    );
    Ok(())
}

fn simulate_race(game: &GameDetails, ctx: &ScenarioCtx<'_>) -> Result<(TileRaceStandings, u32)> {
    let details = &game.details;
    let final_tile = details.final_tile();
    let race_cfg = &ctx.assets.config.race;
    let mut standings = TileRaceStandings::new(details.team_count);
    let mut dice = RaceDice::new(ctx.seed, race_cfg.die_sides);
    let mut turns = 0;

    while !standings.is_finished() {
        ensure!(
            turns < race_cfg.max_turns,
            "race did not finish in {} turns",
            race_cfg.max_turns
        );
        let before = standings.team_positions.clone();
        let rolls = dice.roll_all(details.team_count);
        let movements = standings.take_turn(&rolls, final_tile)?.to_vec();
        turns += 1;

        standings.validate(details.team_count, details.tile_count())?;
        for movement in &movements {
            let from = before[movement.team];
            ensure!(
                movement.new_tile <= final_tile,
                "team {} overshot the finish",
                movement.team
            );
            ensure!(
                movement.win == (movement.new_tile == final_tile),
                "team {} win flag disagrees with position",
                movement.team
            );
            ensure!(
                movement.new_tile > from || from == final_tile,
                "team {} did not advance",
                movement.team
            );
        }
        if ctx.verbose {
            log::info!("turn {turns}: {:?}", standings.team_positions);
        }
    }
    Ok((standings, turns))
}

fn race_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let game = &ctx.assets.game;
    let (standings, turns) = simulate_race(game, ctx)?;
    let final_tile = game.details.final_tile();
    let winners = standings.winners();
    ensure!(!winners.is_empty(), "finished race has no winner");

    let finish = InspectData::open(game, final_tile, Some(&standings))?;
    for winner in &winners {
        ensure!(
            finish.teams_on_tile.contains(winner),
            "winner {winner} not shown on the final tile"
        );
    }
    log::debug!("seed {} finished in {turns} turns, winners {winners:?}", ctx.seed);
    Ok(())
}

fn roundtrip_expectation(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut game = ctx.assets.game.clone();
    if game.user_data.is_none() {
        let roster = MembersStorage::from_wom(&ctx.assets.memberships, game.details.start_time);
        game.attach_user_data(roster)?;
    }
    let restored = GameDetails::from_json(&game.to_json()?)?;
    ensure!(restored == game, "game changed across a JSON round trip");

    let mut standings = TileRaceStandings::new(game.details.team_count);
    let mut dice = RaceDice::new(ctx.seed, ctx.assets.config.race.die_sides);
    standings.take_turn(&dice.roll_all(game.details.team_count), game.details.final_tile())?;
    let restored: TileRaceStandings = serde_json::from_str(&serde_json::to_string(&standings)?)?;
    ensure!(restored == standings, "race standings changed across a JSON round trip");

    let tile = standings.team_positions.first().copied().unwrap_or(0);
    let inspect = InspectData::open(&game, tile, Some(&standings))?;
    let restored: InspectData = serde_json::from_str(&serde_json::to_string(&inspect)?)?;
    ensure!(restored == inspect, "inspector changed across a JSON round trip");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::TesterAssets;

    #[test]
    fn bundled_fixture_passes_every_scenario() {
        let assets = TesterAssets::load_default().unwrap();
        for scenario in catalog_scenarios() {
            for seed in [1, 1337] {
                let ctx = ScenarioCtx {
                    assets: &assets,
                    seed,
                    verbose: false,
                };
                scenario
                    .run(&ctx)
                    .unwrap_or_else(|e| panic!("{} failed: {e:#}", scenario.key));
            }
        }
    }

    #[test]
    fn scoring_flags_tampered_points() {
        let mut assets = TesterAssets::load_default().unwrap();
        if let Some(boards) = assets.game.team_boards.as_mut() {
            boards[0].points += 1;
        }
        let ctx = ScenarioCtx {
            assets: &assets,
            seed: 1,
            verbose: false,
        };
        assert!(scoring_expectation(&ctx).is_err());
        assert!(standings_expectation(&ctx).is_err());
    }

    #[test]
    fn roster_flags_missing_members() {
        let mut assets = TesterAssets::load_default().unwrap();
        assets.game.details.teams[0]
            .members
            .push("Not In Clan".to_string());
        let ctx = ScenarioCtx {
            assets: &assets,
            seed: 1,
            verbose: false,
        };
        let err = roster_expectation(&ctx).unwrap_err();
        assert!(err.to_string().contains("Not In Clan"));
    }
}
