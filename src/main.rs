use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use turistamap::cli::{self, Args};
use turistamap::core::config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, source) = config::load_config()?;

    // Initialize file logger - writes to turistamap.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("turistamap.log") {
        let _ = WriteLogger::init(config::log_level(&file_config), log_config, log_file);
    }

    source.log();
    log::debug!("Config: {:?}", file_config);
    let resolved = config::resolve(&file_config, &args.overrides());

    log::info!("TuristaMap starting up against {}", resolved.base_url);

    let mut app = cli::build_app(&resolved, args.ephemeral)?;
    cli::run(args.command, &mut app).await
}
