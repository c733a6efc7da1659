mod renderer;

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let deck = match args.get(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            let data = std::fs::read(&path)?;
            snapdeck_core::parse_deck(&data)?
        }
        None => snapdeck_core::demo_deck(),
    };

    renderer::run(&deck)?;
    Ok(())
}
