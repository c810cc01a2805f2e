use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use atlasforge::{FONTS_BUCKET, Packer, ResourceFile};
use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atlasforge", version, about = "Pack font glyph atlases into a resource file")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build every atlas requested by the project's *.atlas.yml files
    Pack {
        /// Project directory to search for atlas files
        #[arg(long, default_value = ".")]
        project: PathBuf,
        /// Resource file to read fonts from and store atlases in
        #[arg(long, default_value = "./stage.res")]
        out: PathBuf,
    },
    /// Store a font binary in the resource file
    AddFont {
        /// Identifier atlas requests refer to the font by
        id: String,
        /// TrueType or OpenType file to store
        path: PathBuf,
        #[arg(long, default_value = "./stage.res")]
        out: PathBuf,
    },
    /// List every entry of the resource file
    List {
        #[arg(long, default_value = "./stage.res")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Cmd::Pack { project, out } => cmd_pack(project, out),
        Cmd::AddFont { id, path, out } => cmd_add_font(&id, path, out),
        Cmd::List { out } => cmd_list(out),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose > 0)
        .init();
}

fn cmd_pack(project: PathBuf, out: PathBuf) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut packer = Packer::new(ResourceFile::open(&out)?);
    let report = packer.run(&project);

    info!(
        packed = report.packed.len(),
        failed = report.failed.len(),
        out = %out.display(),
        "packing finished"
    );

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        for failure in &report.failed {
            error!("{failure}");
        }
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_add_font(
    id: &str,
    path: PathBuf,
    out: PathBuf,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let data = fs::read(&path).map_err(|e| atlasforge::PackError::io(&path, e))?;
    let mut resources = ResourceFile::open(&out)?;
    resources.put(FONTS_BUCKET, id, data)?;
    resources.commit()?;
    info!(font = id, from = %path.display(), out = %out.display(), "stored font");
    Ok(ExitCode::SUCCESS)
}

fn cmd_list(out: PathBuf) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let resources = ResourceFile::open(&out)?;
    for bucket in resources.buckets() {
        for key in resources.keys(bucket) {
            let size = resources.get(bucket, key).map_or(0, <[u8]>::len);
            println!("{bucket}/{key}\t{size}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
