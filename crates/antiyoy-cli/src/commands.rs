//! Subcommand implementations. Each writes its report to `out`.

use anyhow::Context;
use antiyoy_core::{build_roster, Coord, Direction, Level, UNOWNED};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Load a level file, logging its size
pub fn load(path: &Path) -> anyhow::Result<Level> {
    let level = Level::from_file(path)
        .with_context(|| format!("Failed to load level {}", path.display()))?;
    info!(
        "Loaded {}x{} level from {}",
        level.width(),
        level.height(),
        path.display()
    );
    Ok(level)
}

pub fn show(level: &Level, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", level)?;
    Ok(())
}

pub fn check(level: &Level, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Level {}x{}", level.width(), level.height())?;

    for (owner, count) in level.owner_counts() {
        let label = match owner {
            o if o < 0 => "water".to_string(),
            UNOWNED => "unowned".to_string(),
            player => format!("player {}", player),
        };
        writeln!(out, "  {:<10} {}", label, count)?;
    }

    if level.to_text().is_err() {
        warn!("Level has owners that cannot be saved to a level file");
    }
    Ok(())
}

pub fn neighbors(level: &Level, coord: Coord, out: &mut impl Write) -> anyhow::Result<()> {
    if !level.in_bounds(coord) {
        warn!("{} is outside the {}x{} level", coord, level.width(), level.height());
    }
    writeln!(out, "{} {}", coord, level.tile(coord))?;

    for (dir, (neighbor, tile)) in Direction::ALL
        .into_iter()
        .zip(level.neighbors(coord))
    {
        let note = if level.in_bounds(neighbor) { "" } else { " (outside)" };
        writeln!(out, "  {:<2} {} {}{}", dir.label(), neighbor, tile, note)?;
    }
    Ok(())
}

pub fn json(level: &Level, out: &mut impl Write) -> anyhow::Result<()> {
    let text = level
        .to_json_friendly()
        .to_json()
        .context("Failed to serialize level")?;
    writeln!(out, "{}", text)?;
    Ok(())
}

/// Build the roster, print the level, then each AI's moves
pub fn run<S: AsRef<str>>(level: &Level, names: &[S], out: &mut impl Write) -> anyhow::Result<()> {
    let mut roster = build_roster(names)?;

    for ai in &roster {
        info!("Registered '{}' as player {}", ai.name(), ai.player_id());
        writeln!(out, "Adding '{}'", ai.name())?;
    }

    writeln!(out, "{}", level)?;

    for ai in roster.iter_mut() {
        // Each AI gets its own snapshot
        let snapshot = level.clone();
        let moves = ai.moves(&snapshot);
        if moves.is_empty() {
            writeln!(out, "Player {} ({}): no moves", ai.player_id(), ai.name())?;
            continue;
        }
        writeln!(out, "Player {} ({}):", ai.player_id(), ai.name())?;
        for m in moves {
            writeln!(out, "  {}", m)?;
        }
    }
    Ok(())
}

pub fn normalize(level: &Level, output: &Path) -> anyhow::Result<()> {
    level
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}
