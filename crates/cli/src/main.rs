//! Domator CLI
//!
//! Builds markup from selector strings and JSON arguments.
//!
//! ```text
//! domator 'ul.menu' '{"role":"menu"}' '["li Home","li About"]'
//! domator --parse 'a#home.nav[href=/] Home'
//! ```

mod input;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dom::{DomArena, DomSerializer, SerializerConfig};
use domator::{parse_selector, BuilderConfig, Domator};
use tracing::Level;

use input::Input;

#[derive(Parser, Debug)]
#[command(name = "domator", version, about = "Build markup from selector strings")]
struct Cli {
    /// Selectors, or JSON objects (attributes) and arrays (children)
    args: Vec<String>,

    /// Read a JSON array of build arguments, appended after the positionals
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print each selector's parsed form as JSON instead of building
    #[arg(long)]
    parse: bool,

    /// Indent the serialized markup
    #[arg(long)]
    pretty: bool,

    /// Reject selectors without a tag instead of creating a div
    #[arg(long)]
    no_default_tag: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.parse {
        return print_descriptors(&cli.args);
    }

    let inputs = cli
        .args
        .iter()
        .map(|raw| Input::classify(raw))
        .collect::<Result<Vec<_>>>()?;
    let mut args = input::build_args(inputs)?;

    if let Some(path) = &cli.file {
        let body = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let from_file =
            input::file_args(&body).with_context(|| format!("in {}", path.display()))?;
        args.extend(from_file);
    }

    let config = if cli.no_default_tag {
        BuilderConfig::strict()
    } else {
        BuilderConfig::default()
    };

    let mut domator = Domator::with_config(DomArena::new(), config);
    let node = domator.build(args).context("build failed")?;
    tracing::debug!("[Domator] Document holds {} nodes", domator.document().len());

    let markup = if cli.pretty {
        let serializer = DomSerializer::with_config(SerializerConfig {
            indent: Some(2),
            ..Default::default()
        });
        serializer.serialize(domator.document(), node)?
    } else {
        domator.to_string(node)?
    };

    println!("{markup}");
    Ok(())
}

fn print_descriptors(selectors: &[String]) -> Result<()> {
    for selector in selectors {
        let descriptor = parse_selector(selector)
            .with_context(|| format!("cannot parse selector `{selector}`"))?;
        println!("{}", serde_json::to_string(&descriptor)?);
    }
    Ok(())
}
