use anyhow::Result;
use megasena::{DrawReport, FetchState, LocaleFormatter, config, render_text};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn load_payload(path: &Path) -> FetchState {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
        .and_then(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))
        });

    match data {
        Ok(value) => FetchState::from_parts(Some(value), false, None),
        Err(message) => FetchState::from_parts(None, false, Some(message)),
    }
}

fn payload_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let target = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.data_dir));

    let files = payload_files(&target)?;
    if files.is_empty() {
        tracing::warn!("No JSON payloads found in {}", target.display());
        return Ok(());
    }

    let formatter = LocaleFormatter::new(config.format.clone());

    for path in files {
        tracing::info!("Reading file: {:?}", path);

        let state = load_payload(&path);
        if let Some(message) = state.error() {
            eprintln!("❌ {}", message);
            continue;
        }

        match state.draw_result() {
            Some(result) => {
                let report = DrawReport::build(&result, &formatter);
                println!("{}", render_text(&report));
            }
            None => println!("⚠ No draw result in {}", path.display()),
        }
    }

    Ok(())
}
