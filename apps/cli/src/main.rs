#![deny(warnings)]

//! Headless checker: validates an Article 7 submission file and reports every
//! rule violation. Exits with status 1 when any error is found.

mod report;
mod submission;

use anyhow::{bail, Context, Result};
use ozone_core::{Localizer, SubmissionKind};
use ozone_i18n::Catalog;
use ozone_rules::{CoercionPolicy, RuleContext, ValidationConfig};
use std::io::Read;
use submission::Submission;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    config: Option<String>,
    locale: Option<String>,
    catalog: Option<String>,
    coercion: Option<CoercionPolicy>,
    format: Format,
    cells: bool,
    only: Option<SubmissionKind>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next(),
            "--locale" => args.locale = it.next(),
            "--catalog" => args.catalog = it.next(),
            "--coercion" => {
                args.coercion = match it.next().as_deref() {
                    Some("zero") => Some(CoercionPolicy::Zero),
                    Some("flag") => Some(CoercionPolicy::Flag),
                    other => bail!("--coercion expects zero or flag, got {:?}", other),
                }
            }
            "--format" => {
                args.format = match it.next().as_deref() {
                    Some("text") => Format::Text,
                    Some("json") => Format::Json,
                    other => bail!("--format expects text or json, got {:?}", other),
                }
            }
            "--cells" => args.cells = true,
            "--only" => {
                let key = it.next().context("--only expects a tab key")?;
                args.only = Some(key.parse()?);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path => args.input = Some(path.to_string()),
        }
    }
    if args.cells && args.format != Format::Json {
        bail!("--cells requires --format json");
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<ValidationConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            serde_yaml::from_str(&text).with_context(|| format!("parsing config {path}"))?
        }
        None => ValidationConfig::default(),
    };
    if let Some(locale) = &args.locale {
        cfg.locale = locale.clone();
    }
    if let Some(coercion) = args.coercion {
        cfg.coercion = coercion;
    }
    Ok(cfg)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) if p != "-" => {
            std::fs::read_to_string(p).with_context(|| format!("reading submission {p}"))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading submission from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON reports stay machine readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let cfg = load_config(&args)?;
    info!(input = ?args.input, ?cfg, only = ?args.only, "starting check");

    let loaded;
    let localizer: &dyn Localizer = match &args.catalog {
        Some(path) => {
            loaded = Catalog::load(path)?;
            &loaded
        }
        None => Catalog::for_locale(&cfg.locale)?,
    };

    let submission = Submission::parse(&read_input(args.input.as_deref())?)?;
    let form = submission.into_form(cfg.essencrit_mode, args.only);
    let report = form.validate(&RuleContext::new(&cfg, localizer));

    match args.format {
        Format::Text => print!("{}", report::render_text(&report)),
        Format::Json if args.cells => {
            let cells = report::render_cells(&form, &report, localizer);
            let doc = serde_json::json!({ "report": &report, "cells": cells });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
