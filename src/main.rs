use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

use pendant_cluster::cli::Cli;
use pendant_cluster::config;
use pendant_cluster::{generate_glb, GltfTemplateSource, TemplateStore};

/// Writes through a sibling temp file so readers never see a partial GLB
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, bytes).with_context(|| format!("Failed to write {:?}", tmp))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move output into {:?}", path))?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    let code = config::encode(&config).context("Configuration has no compact code")?;

    if cli.canonical {
        println!("{}", code);
        return Ok(());
    }

    let assets = cli.assets_dir();
    log::info!("Using pendant assets from {:?}", assets);
    let templates = TemplateStore::with_capacity(GltfTemplateSource::new(assets), cli.template_cache);

    let glb = generate_glb(&config, &templates)?;

    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| format!("{}.glb", code).into());
    write_atomic(&out, &glb)?;

    println!("{}", out.display());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
