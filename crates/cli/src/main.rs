//! LLM Benchviz CLI entry point.

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = llm_benchviz_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
