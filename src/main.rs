//! motionstage headless runner.
//!
//! Builds a stage from command-line arguments, plays every motion queue, and
//! runs the stage clock until all lanes have finished:
//! - **bevy_ecs** for the stage world and its per-tick schedule
//! - **configparser** for the INI configuration file
//!
//! # Example
//!
//! ```sh
//! motionstage --sprite earth --tab 2 \
//!     --motion "1=Move Right 10" --motion "2=Turn Right" --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};

use motionstage::components::actiontab::ActionId;
use motionstage::components::mapposition::MapPosition;
use motionstage::components::sprite::{SpriteId, SpriteKind};
use motionstage::resources::stageconfig::StageConfig;
use motionstage::stage::Stage;

/// Upper bound on runner ticks, so a runaway playback cannot hang the process.
const MAX_TICKS: usize = 1_000_000;

/// Play sprite motion scripts headlessly and print where the sprites end up.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Add a sprite of the given kind (cat or earth). Repeatable.
    #[arg(long = "sprite", value_name = "KIND")]
    sprites: Vec<String>,

    /// Add an action tab to the sprite with this id. Repeatable.
    #[arg(long = "tab", value_name = "SPRITE_ID")]
    tabs: Vec<u32>,

    /// Append a motion to an action tab, as ACTION=COMMAND. Repeatable.
    #[arg(long = "motion", value_name = "ACTION=COMMAND")]
    motions: Vec<String>,

    /// Set a tracked position for collisions, as ACTION=X,Y. Repeatable.
    #[arg(long = "track", value_name = "ACTION=X,Y")]
    tracks: Vec<String>,

    /// Derive tracked positions from sprite positions.
    #[arg(long)]
    follow_sprites: bool,

    /// Do not create the starter cat sprite.
    #[arg(long)]
    no_starter: bool,

    /// Print the final stage as JSON.
    #[arg(long)]
    json: bool,
}

fn split_assignment(arg: &str) -> Option<(&str, &str)> {
    let (key, value) = arg.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn parse_position(value: &str) -> Option<MapPosition> {
    let (x, y) = value.split_once(',')?;
    Some(MapPosition::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn load_config(cli: &Cli) -> StageConfig {
    let mut config = match &cli.config {
        Some(path) => StageConfig::with_path(path),
        None => StageConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        if cli.config.is_some() {
            warn!("{e}; using defaults");
        } else {
            info!("No config file loaded, using defaults");
        }
    }
    if cli.follow_sprites {
        config.follow_sprites = true;
    }
    if cli.no_starter {
        config.starter_sprite = false;
    }
    config
}

fn build_stage(cli: &Cli, config: &StageConfig) -> Stage {
    let mut stage = Stage::new(config);

    for kind in &cli.sprites {
        match SpriteKind::from_name(kind) {
            Some(kind) => {
                stage.add_sprite(kind);
            }
            None => warn!("Unknown sprite kind {kind:?}, skipped"),
        }
    }
    for sprite in &cli.tabs {
        if stage.add_action_tab_for(SpriteId(*sprite)).is_none() {
            warn!("No sprite #{sprite}, tab not added");
        }
    }
    for motion in &cli.motions {
        match split_assignment(motion) {
            Some((action, command)) => stage.append(action, command),
            None => warn!("Ignoring motion {motion:?}: expected ACTION=COMMAND"),
        }
    }
    for track in &cli.tracks {
        let parsed = split_assignment(track)
            .and_then(|(action, pos)| Some((ActionId::new(action), parse_position(pos)?)));
        match parsed {
            Some((action, pos)) => {
                if !stage.set_tracked_position(&action, Some(pos)) {
                    warn!("No action tab {action}, tracked position ignored");
                }
            }
            None => warn!("Ignoring track {track:?}: expected ACTION=X,Y"),
        }
    }
    stage
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli);

    // Early-exit: write the configuration and quit
    if let Some(path) = &cli.write_config {
        let mut out = config.clone();
        out.config_path = path.clone();
        return match out.save_to_file() {
            Ok(()) => {
                println!("Configuration written to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut stage = build_stage(&cli, &config);
    let playback = stage.play();
    let ticks = stage.run_until_idle(config.tick_delta(), MAX_TICKS);
    info!(
        "{} done after {} tick(s), {:.3}s of stage time (finished: {})",
        playback,
        ticks,
        stage.elapsed(),
        stage.is_finished(playback)
    );

    if cli.json {
        match serde_json::to_string_pretty(&stage.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing stage: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for sprite in stage.sprites() {
            println!("{sprite}");
        }
        for tab in stage.action_tabs() {
            println!("{} [{}]: {:?}", tab.label, tab.id, stage.queue(&tab.id));
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("1=Move Right 10"), Some(("1", "Move Right 10")));
        assert_eq!(split_assignment("1-2 = Go to X: 1, Y: 2"), Some(("1-2", "Go to X: 1, Y: 2")));
        assert_eq!(split_assignment("=Turn Left"), None);
        assert_eq!(split_assignment("Turn Left"), None);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("10, -4"), Some(MapPosition::new(10, -4)));
        assert_eq!(parse_position("10"), None);
        assert_eq!(parse_position("a,b"), None);
    }

    #[test]
    fn test_build_stage_from_args() {
        let cli = Cli::parse_from([
            "motionstage",
            "--sprite",
            "earth",
            "--sprite",
            "dragon",
            "--tab",
            "2",
            "--motion",
            "1=Move Forward",
            "--motion",
            "2=Turn Right",
            "--track",
            "1=0,0",
        ]);
        let stage = build_stage(&cli, &StageConfig::new());
        assert_eq!(stage.sprites().len(), 2);
        assert_eq!(stage.queue(&ActionId::new("1")), ["Move Forward"]);
        assert_eq!(stage.queue(&ActionId::new("2")), ["Turn Right"]);
        assert_eq!(stage.tracked_position(&ActionId::new("1")), Some(MapPosition::new(0, 0)));
    }
}
