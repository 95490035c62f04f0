// SPDX-License-Identifier: MPL-2.0
//! Command-line upload client: sends a description and image files to a
//! gallery server, drawing a progress bar from the upload callback.

use gallery_tracker::config;
use gallery_tracker::error::{Error, Result};
use gallery_tracker::upload::{UploadProgress, Uploader};
use std::io::Write;
use std::path::PathBuf;

const BAR_WIDTH: usize = 30;

const USAGE: &str = "\
Usage: gallery_tracker [OPTIONS] FILE...

Options:
  --server URL         Gallery server base URL (overrides the config file)
  --description TEXT   Post description (default: empty)
  --config FILE        Read settings from FILE instead of the default path
  -h, --help           Print this help
";

/// Renders the bar fill for a progress snapshot, e.g. `[######----] 60%`.
fn render_bar(progress: UploadProgress) -> String {
    let filled = BAR_WIDTH * progress.percent() as usize / 100;
    let mut bar = String::with_capacity(BAR_WIDTH + 8);
    bar.push('[');
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push_str("] ");
    bar.push_str(&progress.label());
    bar
}

fn run() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return Ok(());
    }

    let server: Option<String> = args
        .opt_value_from_str("--server")
        .map_err(|e| Error::Config(e.to_string()))?;
    let description: String = args
        .opt_value_from_str("--description")
        .map_err(|e| Error::Config(e.to_string()))?
        .unwrap_or_default();
    let config_path: Option<PathBuf> = args
        .opt_value_from_str("--config")
        .map_err(|e| Error::Config(e.to_string()))?;
    let files: Vec<PathBuf> = args
        .finish()
        .into_iter()
        .map(PathBuf::from)
        .collect();

    let mut config = match config_path {
        Some(path) => config::load_from_path(&path)?,
        None => config::load()?,
    };
    if let Some(server) = server {
        config.server_url = Some(server);
    }

    let uploader = Uploader::from_config(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(uploader.upload(&description, &files, |progress| {
        eprint!("\r{}", render_bar(progress));
        let _ = std::io::stderr().flush();
    }))?;
    eprintln!();
    println!("Uploaded {} file(s).", files.len());
    Ok(())
}

fn main() -> std::process::ExitCode {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();
    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
