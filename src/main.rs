use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{layout, read, walk};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "stac")]
#[command(version = VERSION)]
#[command(about = "Read, walk, and lay out SpatioTemporal Asset Catalogs")]
struct Cli {
    /// JSON configuration file (defaults to $STAC_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a single STAC object
    Read(read::ReadArgs),
    /// List every object in the catalog that holds an href
    Walk(walk::WalkArgs),
    /// Lay a catalog out under a new directory and write it
    Layout(layout::LayoutArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { config: cli.config };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
