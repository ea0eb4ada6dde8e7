/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! `lumaprint_util` — a small CLI around the library's three public
//! operations. Argument parsing follows the teacher binary's own choice of
//! `pico-args` over a heavier framework.

use std::fs;
use std::process::ExitCode;

use anyhow::Context;

use lumaprint::adapters::image_io::{self, ImageFormat};
use lumaprint::overlay::{Anchor, VisibleOverlay};
use lumaprint::{VerifyOptions, WatermarkOptions};

fn print_usage() {
    eprintln!(
        "lumaprint_util <command> [options]\n\n\
         Commands:\n\
         \x20 watermark <in> <out> --payload <p> [--config FILE] [--quality Q] [--visible TEXT]\n\
         \x20 verify <in> --payload <p> [--threshold T]\n\
         \x20 extract <in>\n"
    );
}

/// Loads a [`WatermarkOptions`] override from a TOML/JSON file at `path`.
/// Only JSON is implemented; a `.toml` extension is rejected with a clear
/// error rather than silently falling back to defaults.
fn load_watermark_config(path: &str) -> anyhow::Result<WatermarkOptions> {
    if path.to_ascii_lowercase().ends_with(".toml") {
        anyhow::bail!("TOML config files are not yet supported; use JSON");
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading config file {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))
}

fn run() -> anyhow::Result<()> {
    let mut args = pico_args::Arguments::from_env();
    let verbosity = args.contains("-v") as u8 + args.contains("-vv") as u8 * 2;
    lumaprint::logging::init(verbosity);

    let command = args.subcommand()?.unwrap_or_default();
    match command.as_str() {
        "watermark" => {
            let payload: String = args.value_from_str("--payload")?;
            let config: Option<String> = args.opt_value_from_str("--config")?;
            let quality: Option<f32> = args.opt_value_from_str("--quality")?;
            let visible: Option<String> = args.opt_value_from_str("--visible")?;
            let free: Vec<String> = args
                .finish()
                .into_iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect();
            let (input, output) = match free.as_slice() {
                [input, output] => (input.clone(), output.clone()),
                _ => anyhow::bail!("watermark requires <in> <out>"),
            };

            let bytes = fs::read(&input)?;
            let mut opts = match config {
                Some(path) => load_watermark_config(&path)?,
                None => WatermarkOptions::default(),
            };
            if let Some(q) = quality {
                opts.jpeg_quality = q;
            }
            if let Some(text) = visible {
                opts.visible = Some(VisibleOverlay {
                    text,
                    anchor: Anchor::BottomRight,
                    ..Default::default()
                });
            }

            let format = format_for_path(&output);
            let result = lumaprint::watermark(&bytes, &payload, format, &opts)?;
            fs::write(&output, &result.bytes)?;
            println!(
                "wrote {} ({}x{}, {})",
                output, result.width, result.height, result.mime_type
            );
        }
        "verify" => {
            let payload: String = args.value_from_str("--payload")?;
            let threshold: Option<f32> = args.opt_value_from_str("--threshold")?;
            let free: Vec<String> = args
                .finish()
                .into_iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect();
            let input = free.first().cloned().ok_or_else(|| anyhow::anyhow!("verify requires <in>"))?;

            let bytes = fs::read(&input)?;
            let buffer = image_io::decode(&bytes)?;
            let mut opts = VerifyOptions::default();
            if let Some(t) = threshold {
                opts.threshold = t;
            }
            let outcome = lumaprint::verify(&buffer, &payload, &opts)?;
            println!("match={} confidence={:.3}", outcome.is_match, outcome.confidence);
            if !outcome.is_match {
                return Err(anyhow::anyhow!("no match"));
            }
        }
        "extract" => {
            let free: Vec<String> = args
                .finish()
                .into_iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect();
            let input = free.first().cloned().ok_or_else(|| anyhow::anyhow!("extract requires <in>"))?;
            let bytes = fs::read(&input)?;
            let buffer = image_io::decode(&bytes)?;
            let outcome = lumaprint::extract_debug(&buffer)?;
            println!(
                "digest={} confidence={:.3} (diagnostic only, not a verified payload)",
                outcome.digest_hex, outcome.confidence
            );
        }
        other => {
            if !other.is_empty() {
                eprintln!("unknown command: {other}");
            }
            print_usage();
            anyhow::bail!("no command given");
        }
    }

    Ok(())
}

fn format_for_path(path: &str) -> ImageFormat {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        ImageFormat::Jpeg
    } else if lower.ends_with(".webp") {
        ImageFormat::WebP
    } else {
        ImageFormat::Png
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
