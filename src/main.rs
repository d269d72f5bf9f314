use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use image::GrayImage;
use locator_expr::{Anchor, InMemoryAliasStore, Locator, LocatorRegistry, Resolver};
use spotter_cli::ImageFinder;
use spotter_core_types::Region;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use template_match::{MatchOptions, TemplateMatcher, DEFAULT_CONFIDENCE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spotter", version, about = "Locate things from locator expressions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an expression and print its AST as JSON
    Parse {
        /// Locator expression, e.g. "(point:10,20 or point:20,20) then offset:200,0"
        expression: String,

        /// Alias definitions as NAME=LITERAL, may repeat
        #[arg(long = "alias", value_name = "NAME=LITERAL")]
        aliases: Vec<String>,
    },

    /// Search a template image inside a source image
    Find {
        /// Source image file
        #[arg(long)]
        image: PathBuf,

        /// Template image file
        #[arg(long)]
        template: PathBuf,

        /// Matching confidence (1-100)
        #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
        confidence: u8,

        /// Stop after this many matches
        #[arg(long)]
        limit: Option<usize>,

        /// Restrict the search to "left,top,right,bottom"
        #[arg(long, value_name = "L,T,R,B")]
        region: Option<String>,
    },

    /// Resolve an expression against a screenshot file
    Resolve {
        /// Locator expression
        expression: String,

        /// Screenshot image file
        #[arg(long)]
        image: PathBuf,

        /// Base directory for template paths (defaults to the screenshot's)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Alias definitions as NAME=LITERAL, may repeat
        #[arg(long = "alias", value_name = "NAME=LITERAL")]
        aliases: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Parse {
            expression,
            aliases,
        } => run_parse(&expression, &aliases),
        Command::Find {
            image,
            template,
            confidence,
            limit,
            region,
        } => run_find(&image, &template, confidence, limit, region.as_deref()),
        Command::Resolve {
            expression,
            image,
            dir,
            aliases,
        } => run_resolve(&expression, &image, dir, &aliases),
    }
}

fn run_parse(expression: &str, aliases: &[String]) -> Result<()> {
    let resolver = Resolver::new(build_registry(aliases)?);
    let ast = resolver.parse(expression)?;
    println!("{}", serde_json::to_string_pretty(&ast)?);
    Ok(())
}

fn run_find(
    image: &Path,
    template: &Path,
    confidence: u8,
    limit: Option<usize>,
    region: Option<&str>,
) -> Result<()> {
    let source = load_gray(image)?;
    let pattern = load_gray(template)?;

    let mut options = MatchOptions::new().with_confidence(confidence);
    if let Some(limit) = limit {
        options = options.with_limit(limit);
    }
    if let Some(region) = region {
        options = options.with_region(parse_region(region)?);
    }

    for matched in TemplateMatcher::find(&source, &pattern, &options)? {
        println!("{}", matched);
    }
    Ok(())
}

fn run_resolve(
    expression: &str,
    image: &Path,
    dir: Option<PathBuf>,
    aliases: &[String],
) -> Result<()> {
    let screen = load_gray(image)?;
    let base_dir = dir
        .or_else(|| image.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let resolver = Resolver::new(build_registry(aliases)?);
    let mut finder = ImageFinder::new(screen).with_base_dir(base_dir);

    for anchor in resolver.dispatch::<Region, _>(expression, &mut finder)? {
        match anchor {
            Anchor::Undefined => println!("undefined"),
            Anchor::Match(region) => println!("{}", region),
        }
    }
    Ok(())
}

/// Build a registry whose alias store holds the NAME=LITERAL definitions
fn build_registry(aliases: &[String]) -> Result<LocatorRegistry> {
    let plain = LocatorRegistry::new();
    let mut store = InMemoryAliasStore::new();
    for definition in aliases {
        let (name, literal) = definition
            .split_once('=')
            .with_context(|| format!("alias '{}' is not NAME=LITERAL", definition))?;
        let locator = plain
            .parse_literal(literal)
            .with_context(|| format!("alias '{}' has a bad literal", name))?;
        store.insert(name, locator);
    }
    Ok(LocatorRegistry::new().with_aliases(Arc::new(store)))
}

fn load_gray(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)
        .with_context(|| format!("cannot load image '{}'", path.display()))?
        .to_luma8())
}

fn parse_region(text: &str) -> Result<Region> {
    let literal = format!("region:{}", text);
    match LocatorRegistry::new().parse_literal(&literal)? {
        Locator::Region(region) => Ok(region),
        other => bail!("'{}' is not a region literal (got {})", text, other),
    }
}
