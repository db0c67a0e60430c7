// src/main.rs

//! `lightning-viz`: plot a JSON payload from the command line.
//!
//! ```text
//! lightning-viz [--host URL] [--config FILE] [--local OUT.html] [--session NAME] <type> <data.json | ->
//! ```
//!
//! The payload is sent through the generic plot, so any server-side plot
//! type works. Prints the permalink, or writes the rendered document when
//! `--local` is given.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lightning_viz::{Config, Data, Lightning, Mode};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "lightning-viz", about = "Plot a JSON payload with Lightning")]
struct Args {
    /// Lightning server, overriding the config and environment
    #[arg(long)]
    host: Option<String>,
    /// JSON config file to load instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,
    /// Render offline into this HTML file
    #[arg(long, value_name = "OUT")]
    local: Option<PathBuf>,
    /// Create a named session for the plot
    #[arg(long, value_name = "NAME")]
    session: Option<String>,
    /// Plot type, e.g. line or scatter
    type_name: String,
    /// Payload file, or - for stdin
    input: String,
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read payload from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read payload from {input}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::from_env(),
    };
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if args.local.is_some() {
        config.mode = Mode::Local;
    }

    let text = read_input(&args.input)?;
    let json: serde_json::Value = serde_json::from_str(&text).context("Payload is not JSON")?;
    let data = Data::try_from(json).context("Payload cannot be plotted")?;

    let mut lgn = Lightning::with_config(config).context("Failed to set up the client")?;
    if let Some(name) = &args.session {
        lgn.create_session(Some(name.as_str()))
            .with_context(|| format!("Failed to create session {name}"))?;
    }
    let viz = lgn
        .plot(&args.type_name, data)
        .with_context(|| format!("Failed to create {} visualization", args.type_name))?;

    match &args.local {
        Some(out) => {
            fs::write(out, viz.html()?)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!("wrote {}", out.display());
        }
        None => println!("{}", viz.permalink()?),
    }
    Ok(())
}
