use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use paperlink_core::{AppConfig, ExitCode, Link, Record, Researcher};
use paperlink_science::disambiguation::{Disambiguator, RosterFilter, StaticCandidateSource};
use paperlink_science::display::{render, Detail, RenderContext};
use paperlink_science::identifiers::url_to_id;
use paperlink_science::links::{canonicalize_links, expand_links, LinkRanker};
use paperlink_science::ScienceError;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "paperlink",
    about = "Canonical links and author disambiguation for paper catalogs",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format.
    /// Also enabled by setting PAPERLINK_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Read config from this file instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Map URLs to (scheme, id) pairs.
    Canon {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Canonicalize a JSON list of links and expand them into URLs.
    Links {
        file: PathBuf,
        /// Use the legacy priority table and fail on unknown labels.
        #[arg(long)]
        legacy: bool,
    },

    /// Render a JSON list of records.
    Show {
        file: PathBuf,
        #[arg(long)]
        short: bool,
        #[arg(long)]
        width: Option<usize>,
    },

    /// Rank candidate profiles for researchers of a roster.
    FindIds {
        /// JSON list of researchers.
        #[arg(long)]
        roster: PathBuf,
        /// JSON list of candidate `{author, papers}` entries.
        #[arg(long)]
        candidates: PathBuf,
        /// Only resolve these researchers.
        #[arg(long, action = clap::ArgAction::Append)]
        name: Vec<String>,
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
        /// Overrides `disambiguation.scheme`.
        #[arg(long)]
        scheme: Option<String>,
        /// Overrides `disambiguation.minimum_papers`.
        #[arg(long)]
        minimum: Option<usize>,
        /// Stop after this many papers per researcher.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Print the config file path.
    Path,
    /// Write the default config if none exists.
    Init {
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("PAPERLINK_JSON").as_deref() == Ok("1");

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    init_logging(&config);
    debug!(path = %config_path.display(), "config loaded");

    match cli.command {
        Commands::Canon { urls } => {
            let pairs: Vec<_> = urls.iter().map(|u| (u, url_to_id(u))).collect();
            let dur = start.elapsed().as_millis();

            if json_output {
                let items: Vec<_> = pairs
                    .iter()
                    .map(|(url, pair)| match pair {
                        Some((scheme, id)) => serde_json::json!({"url":url,"type":scheme,"id":id}),
                        None => serde_json::json!({"url":url,"type":null,"id":null}),
                    })
                    .collect();
                print_json(&serde_json::json!({"status":"ok","data":items,"meta":{"duration_ms":dur}}))?;
            } else {
                for (url, pair) in &pairs {
                    match pair {
                        Some((scheme, id)) => println!("{scheme}\t{id}"),
                        None => println!("-\t{url}"),
                    }
                }
            }
            if pairs.iter().any(|(_, p)| p.is_none()) {
                std::process::exit(ExitCode::NotFound as i32);
            }
        }

        Commands::Links { file, legacy } => {
            let raw: Vec<Link> = load_json(&file)?;
            let canonical = canonicalize_links(&raw);
            let ranker = if legacy {
                LinkRanker::legacy()
            } else {
                RenderContext::from_config(&config.display).ranker
            };

            let expanded = match expand_links(&canonical, &ranker) {
                Ok(expanded) => expanded,
                Err(ScienceError::UnknownLinkLabel(label)) => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"error","error":"unknown_label","message":label}))?;
                    } else {
                        eprintln!("Unknown link label: {label}");
                    }
                    std::process::exit(ExitCode::InvalidArgs as i32);
                }
                Err(e) => return Err(e.into()),
            };
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "links": canonical, "expanded": expanded },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                for link in &expanded {
                    println!("{:<24} {}", link.label, link.url);
                }
            }
        }

        Commands::Show { file, short, width } => {
            let records: Vec<Record> = load_json(&file)?;
            let mut ctx = RenderContext::from_config(&config.display)
                .with_detail(if short { Detail::Short } else { Detail::Full });
            if let Some(width) = width {
                ctx.width = width;
            }

            if json_output {
                let rendered = records
                    .iter()
                    .map(|r| render(r, &RenderContext { styled: false, ..ctx.clone() }))
                    .collect::<paperlink_science::Result<Vec<_>>>()?;
                print_json(&serde_json::json!({"status":"ok","data":rendered}))?;
            } else {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print!("{}", render(record, &ctx)?);
                }
            }
        }

        Commands::FindIds {
            roster,
            candidates,
            name,
            before,
            after,
            scheme,
            minimum,
            limit,
        } => {
            let roster: Vec<Researcher> = load_json(&roster)?;
            let source = StaticCandidateSource::from_file(&candidates)
                .with_context(|| format!("loading candidates {}", candidates.display()))?;

            let mut disambiguation = config.disambiguation.clone();
            if let Some(scheme) = scheme {
                disambiguation.scheme = scheme;
            }
            if minimum.is_some() {
                disambiguation.minimum_papers = minimum;
            }
            let disambiguator = Disambiguator::from_config(&disambiguation);

            let filter = RosterFilter {
                names: (!name.is_empty()).then_some(name),
                before,
                after,
            };
            let targets = filter.apply(&roster);
            if targets.is_empty() {
                if json_output {
                    print_json(&serde_json::json!({"status":"error","error":"not_found","message":"No researcher matches the filter"}))?;
                } else {
                    eprintln!("No researcher matches the filter");
                }
                std::process::exit(ExitCode::NotFound as i32);
            }

            let ctx = RenderContext::from_config(&config.display).with_detail(Detail::Short);
            let mut items = Vec::new();
            for target in targets {
                let ranked = disambiguator.candidates(&roster, target, &source).await?;
                for found in ranked.take(limit.unwrap_or(usize::MAX)) {
                    let found = match found {
                        Ok(found) => found,
                        Err(e @ ScienceError::ContractViolation { .. }) => {
                            warn!(researcher = %target.name, "{e}");
                            continue;
                        }
                        Err(e) => return Err(e.into()),
                    };

                    if json_output {
                        items.push(serde_json::json!({
                            "researcher": target.name,
                            "researcher_id": target.id,
                            "type": disambiguator.scheme(),
                            "candidate_id": found.candidate_id,
                            "candidate_name": found.author.name,
                            "overlap": found.overlap,
                            "prior": found.prior,
                            "title": found.paper.title,
                            "year": found.paper.year(),
                        }));
                    } else {
                        let marker = if found.is_rejected() { " [rejected]" } else { "" };
                        println!(
                            "{}  {} {}{marker}",
                            target.name,
                            disambiguator.scheme(),
                            found.candidate_id
                        );
                        print!("{}", render(&Record::Paper(found.paper), &ctx)?);
                    }
                }
            }

            if json_output {
                let dur = start.elapsed().as_millis();
                print_json(&serde_json::json!({"status":"ok","data":items,"meta":{"duration_ms":dur}}))?;
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                if json_output {
                    print_json(&serde_json::to_value(&config)?)?;
                } else {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
            ConfigAction::Path => println!("{}", config_path.display()),
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    eprintln!("Config already exists: {}", config_path.display());
                    std::process::exit(ExitCode::GeneralError as i32);
                }
                AppConfig::default().save_to(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_env("PAPERLINK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    paperlink_core::load_json(path).with_context(|| format!("loading {}", path.display()))
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
