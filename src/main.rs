// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Instant;

use darkroom::config::{load_and_validate_config, RuntimeBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <config.yaml> <workspace> <image> [directives]", args[0]);
        eprintln!(
            "Example: {} configs/demo.yaml ws_1 img_1 \"w=800,crop=cover,format=webp\"",
            args[0]
        );
        std::process::exit(1);
    }

    let config_file = &args[1];
    let workspace = &args[2];
    let image = &args[3];
    let directives = args.get(4).map(String::as_str).unwrap_or("");

    let config = load_and_validate_config(config_file)?;
    let service = RuntimeBuilder::from_config(&config).await?;

    println!("📋 Configuration: {config_file}");
    println!("🖼️  Render: {workspace}/{image} \"{directives}\"");

    let started = Instant::now();
    let outcome = service.render_transform(workspace, image, directives).await?;
    println!("⏱️  Resolved in {:?}", started.elapsed());
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
