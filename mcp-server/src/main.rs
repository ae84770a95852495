use anyhow::Result;
use megasena::LocaleFormatter;
use megasena_mcp::config;
use megasena_mcp::{DrawUseCase, FormatUseCase, MCPHandler, stdio};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Let's check the Mega-Sena numbers.");

    let formatter = Arc::new(LocaleFormatter::new(config.format));

    let draw_use_case = DrawUseCase::new(Arc::clone(&formatter));
    let format_use_case = FormatUseCase::new(Arc::clone(&formatter));

    let handler = MCPHandler::new(Arc::new(draw_use_case), Arc::new(format_use_case));

    let (reader, writer) = stdio();

    handler.serve(reader, writer).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    Ok(())
}
