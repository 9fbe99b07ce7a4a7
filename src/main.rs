use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use paneorg_app::{init_logging, App};
use paneorg_config::Config;

/// Keeps C++ sources and headers in their own editor split panes
#[derive(Parser, Debug)]
#[command(name = "paneorg")]
#[command(about = "Groups .cpp and .h files into separate panes", long_about = None)]
struct Args {
    /// Config file (defaults to the XDG config location)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Watch a directory and organize files as they appear
    #[arg(long, value_name = "DIR", conflicts_with = "files")]
    watch: Option<PathBuf>,

    /// Files to open, in order
    #[arg(value_name = "FILE", required_unless_present = "watch")]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    init_logging(&config);

    let mut app = App::new(&config);

    if let Some(dir) = &args.watch {
        return app.watch(dir, |summary| println!("{}\n", summary));
    }

    for path in &args.files {
        if let Err(e) = app.open_file(path) {
            eprintln!("Error: {:#}", e);
            continue;
        }
        app.process_pending();
    }

    // Deferred organization needs at least one full template delay
    let timeout = Duration::from_millis(config.organizer.template_delay_ms) * 2
        + Duration::from_secs(5);
    app.run_until_idle(timeout)?;

    println!("{}", app.layout().summary());
    Ok(())
}
