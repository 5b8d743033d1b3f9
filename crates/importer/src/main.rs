//! Tool importer entry point.

use clap::Parser;
use llm_benchviz_importer::{db, import_dir};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Import tool JSON exports into the web UI SQLite database.
#[derive(Parser, Debug)]
#[command(name = "benchviz-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing tool JSON export files.
    tools_dir: PathBuf,

    /// SQLite database to import into.
    #[arg(default_value = "webui.db")]
    db_path: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(
        args.tools_dir.is_dir(),
        "tools directory not found: {}",
        args.tools_dir.display()
    );

    println!("Looking for tools in: {}", args.tools_dir.display());
    println!("Database path: {}", args.db_path.display());

    let conn = db::open(&args.db_path)?;
    let stats = import_dir(&conn, &args.tools_dir)?;

    println!(
        "Imported {} tools ({} metadata skipped, {} failed)",
        stats.imported, stats.skipped, stats.failed
    );
    Ok(())
}
