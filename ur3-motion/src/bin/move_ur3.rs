use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use ur3_motion::{utils, NamedPositions, PositionCommander, Ur3MotionConfig};
use ur3_motion_config::resolve_positions_path;

/// Moves a UR3 arm to named joint positions.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct MoveUr3Args {
    /// Names of the positions to visit, in order. Defaults to `default_positions`
    /// of the setting file (HOME).
    positions: Vec<String>,
    /// Path to the setting file.
    #[clap(short, long, value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Path to the positions file. Takes priority over the setting file,
    /// UR3_MOTION_POSITIONS_PATH and the installed ur3_motion package.
    #[clap(short, long, value_name = "PATH")]
    positions_path: Option<PathBuf>,
    /// Planning group to move. Takes priority over the setting file.
    #[clap(short, long)]
    group_name: Option<String>,
    /// Prints the available positions in degrees and exits.
    #[clap(long)]
    list: bool,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
}

fn load_positions(path: Option<PathBuf>) -> NamedPositions {
    match resolve_positions_path(path) {
        Ok(path) => NamedPositions::load_or_empty(path),
        Err(e) => {
            error!("Failed to load joint positions: {e}");
            NamedPositions::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    utils::init_tracing();
    let args = MoveUr3Args::parse();
    info!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&Ur3MotionConfig::default())?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = match utils::get_config_path(args.config_path) {
        Some(config_path) => Ur3MotionConfig::try_new(config_path)?,
        None => Ur3MotionConfig::default(),
    };
    if let Some(group_name) = args.group_name {
        config.group_name = group_name;
    }

    let positions = load_positions(args.positions_path.or_else(|| config.positions_path.clone()));
    if args.list {
        for (name, _) in positions.iter() {
            let degrees = positions.get_degrees(name).unwrap_or_default();
            println!("{name}: {degrees:?}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let interface = config.create_motion_planning_interface()?;
    let arm = interface.get_group(&config.group_name)?;
    let commander = PositionCommander::new(arm, positions);

    let targets = if args.positions.is_empty() {
        config.default_positions.clone()
    } else {
        args.positions
    };
    let mut all_reached = true;
    for name in &targets {
        all_reached &= commander.move_to_named_position(name).await;
    }

    drop(commander);
    drop(interface);
    Ok(if all_reached {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
