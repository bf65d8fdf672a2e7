//! systemd2rc: convert a systemd service unit into an OpenRC init script.
//!
//! The script is printed to stdout unless an output path is given, in which
//! case it is written atomically and marked executable. Nothing is written
//! if the unit cannot be read, fails validation, or cannot be converted.

mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

/// Permissions of a generated init script (`rwxr-xr-x`).
const SCRIPT_MODE: u32 = 0o755;

/// systemd2rc: convert a systemd service unit into an OpenRC init script
#[derive(Parser, Debug)]
#[command(name = "systemd2rc", version, about)]
struct Cli {
    /// The unit file to convert (`-` reads standard input)
    input: PathBuf,

    /// Where to write the init script (default: standard output)
    output: Option<PathBuf>,

    /// Only check that the unit can be converted; write nothing
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_level = std::env::var("SYSTEMD_LOG_LEVEL").ok();
    let level = logging::level_filter(cli.verbose, env_level.as_deref());
    if let Err(e) = logging::setup_logging(level) {
        eprintln!("systemd2rc: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("systemd2rc: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = read_input(&cli.input)?;
    debug!("read {} bytes from {}", text.len(), cli.input.display());

    let script = libsystemd2rc::convert(&text)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    if cli.check {
        println!("{}: ok", cli.input.display());
        return Ok(());
    }

    match &cli.output {
        Some(path) => {
            write_script(path, &script)?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(script.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read unit from standard input")?;
        return Ok(text);
    }

    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Write `script` to `path` through a temporary file in the same directory,
/// so `path` either keeps its old content or receives the complete script.
fn write_script(path: &Path, script: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create a temporary file in {}", dir.display()))?;
    tmp.write_all(script.as_bytes())
        .with_context(|| format!("cannot write {}", tmp.path().display()))?;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(SCRIPT_MODE))
        .with_context(|| format!("cannot set permissions on {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("cannot write {}", path.display()))?;

    Ok(())
}
