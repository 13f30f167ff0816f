mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use rc_player::SpriteGrid;
use rc_server::catalog::{AssetResolver, StaticCatalog};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting reelcast server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    rc_server::start(config).await?;
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, checking default locations");
            config::load_config_or_default(None)?
        }
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        println!("Configuration loaded with {} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  ! {warning}");
        }
    }
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Chunk size: {} bytes", config.streaming.effective_chunk_size());
    println!("  Catalog base: {:?}", config.catalog.base_dir);
    println!("  Assets: {}", config.catalog.assets.len());
    println!(
        "  Preview grid: {}x{} sheet, {}x{} cells",
        config.preview.sheet_width,
        config.preview.sheet_height,
        config.preview.cell_width,
        config.preview.cell_height
    );

    Ok(())
}

fn list_catalog(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = StaticCatalog::from_config(&config.catalog);

    if catalog.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }

    let presence = |p: &Path| if p.is_file() { "ok" } else { "missing" };

    for entry in catalog.entries() {
        println!("{} - {}", entry.id, entry.title);
        println!(
            "  media:   {} [{}]",
            entry.media_path.display(),
            presence(entry.media_path.as_path())
        );
        match &entry.caption_path {
            Some(p) => println!("  caption: {} [{}]", p.display(), presence(p.as_path())),
            None => println!("  caption: none"),
        }
        match &entry.preview_path {
            Some(p) => println!("  preview: {} [{}]", p.display(), presence(p.as_path())),
            None => println!("  preview: none"),
        }
    }

    Ok(())
}

fn print_cell(percent: u32, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let grid = SpriteGrid::from(config.preview);
    let cell = grid.cell_for(percent);
    println!(
        "x={} y={} object-position: {}",
        cell.x,
        cell.y,
        cell.object_position()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelcast=trace,rc_server=trace,rc_player=debug,rc_core=debug,tower_http=debug"
                .to_string()
        } else {
            "reelcast=info,rc_server=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Catalog => list_catalog(cli.config.as_deref()),
        Commands::Cell { percent } => print_cell(percent, cli.config.as_deref()),
        Commands::Version => {
            println!("reelcast {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
