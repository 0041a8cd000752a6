//! Development CLI for the retrieval engine.
//!
//! Not the production transport — a harness for exercising the engine
//! against converter-produced catalog files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use care_chat_search::{Engine, FaqCatalog, Lexicon, PriceCatalog, Reply, ReplyOption};

#[derive(Parser)]
#[command(name = "ccs", version, about = "Subscription-care chat retrieval engine")]
struct Cli {
    /// Path to the converted FAQ catalog JSON.
    #[arg(long, env = "CCS_FAQ_CATALOG")]
    faq: PathBuf,

    /// Path to the converted price catalog JSON.
    #[arg(long, env = "CCS_PRICE_CATALOG")]
    price: PathBuf,

    /// Emit the raw engine outcome as JSON instead of the rendered reply.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one utterance.
    Ask { utterance: String },
    /// List FAQ categories.
    Categories,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "request failed");
            if cli.json {
                let payload = serde_json::json!({ "error": { "message": err.to_string() } });
                eprintln!("{payload}");
            } else {
                println!("{}", render_plain(&Reply::fallback()));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let faq = FaqCatalog::load(&cli.faq)
        .with_context(|| format!("loading faq catalog from {}", cli.faq.display()))?;
    let price = PriceCatalog::load(&cli.price)
        .with_context(|| format!("loading price catalog from {}", cli.price.display()))?;
    let engine = Engine::new(&faq, &price, Lexicon::builtin());

    match &cli.command {
        Commands::Ask { utterance } => {
            let outcome = engine.handle(utterance)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", render_plain(&Reply::from_outcome(&outcome)));
            }
        }
        Commands::Categories => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&faq.categories())?);
            } else {
                for category in faq.categories() {
                    println!("{category}");
                }
            }
        }
    }
    Ok(())
}

/// Plain-terminal rendering of a reply: body, link line, option list.
fn render_plain(reply: &Reply) -> String {
    fn options_block(options: &[ReplyOption]) -> String {
        options
            .iter()
            .map(|o| format!("  [{}] → {}", o.label, o.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
    match reply {
        Reply::Text { text, options } | Reply::Menu { text, options } => {
            format!("{text}\n\n{}", options_block(options))
        }
        Reply::Card {
            text,
            link_label,
            url,
            options,
        } => format!("{text}\n\n🔗 {link_label}: {url}\n\n{}", options_block(options)),
    }
}
