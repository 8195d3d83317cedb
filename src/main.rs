//! Heroicon CLI
//!
//! Usage:
//!   heroicon --catalog <FILE> [OPTIONS] <NAME>
//!
//! Options:
//!   -c, --catalog <FILE>   Icon catalog (JSON or TOML)
//!   -V, --variant <NAME>   outline, solid, mini or micro [default: outline]
//!   -s, --size <N>         Set width and height
//!   --width <N>            Set width
//!   --height <N>           Set height
//!   --class <CLASS>        Extra CSS classes
//!   -a, --attr <K=V>       Extra attribute (repeatable)
//!   --comment              Emit the leading name comment
//!   --config <FILE>        Render configuration (TOML)
//!   -l, --list             List icon names instead of rendering
//!   -v, --verbose          Increase log verbosity (-v, -vv)

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use heroicon::{Catalog, CatalogError, Error, Heroicons, Options, RenderConfig};

#[derive(Parser)]
#[command(name = "heroicon")]
#[command(about = "Render inline SVG icons from an icon catalog")]
struct Cli {
    /// Icon name (omit with --list or --search)
    name: Option<String>,

    /// Icon catalog file (JSON or TOML)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Icon variant
    #[arg(short = 'V', long, default_value = "outline")]
    variant: String,

    /// Width and height in pixels
    #[arg(short, long)]
    size: Option<String>,

    /// Width in pixels
    #[arg(long)]
    width: Option<String>,

    /// Height in pixels
    #[arg(long)]
    height: Option<String>,

    /// Extra CSS classes
    #[arg(long)]
    class: Option<String>,

    /// Extra attribute as key=value
    #[arg(short, long = "attr", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    /// Emit a leading `<!-- Heroicon name: ... -->` comment
    #[arg(long)]
    comment: bool,

    /// Render configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List all icon names
    #[arg(short, long)]
    list: bool,

    /// List icons whose name or keywords match
    #[arg(long)]
    search: Option<String>,

    /// Log verbosity: -v info, -vv debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("heroicon=warn"),
        1 => EnvFilter::new("heroicon=info"),
        _ => EnvFilter::new("heroicon=debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_file(path)?,
        None => RenderConfig::default(),
    };
    if cli.comment {
        config = config.with_comment(true);
    }

    let catalog = load_catalog(&cli.catalog)?;

    if cli.list {
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if let Some(term) = &cli.search {
        for icon in catalog.search(term) {
            println!("{}\t{}", icon.name, icon.variant_names().join(","));
        }
        return Ok(());
    }

    let mut options = Options::new();
    let flags = [
        ("size", &cli.size),
        ("width", &cli.width),
        ("height", &cli.height),
        ("class", &cli.class),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            options.insert(key, value.as_str());
        }
    }
    for (key, value) in &cli.attrs {
        options.insert(key, value.as_str());
    }

    let name = cli.name.unwrap_or_default();
    let mut icons = Heroicons::new(catalog, config);
    let markup = icons.render(name, cli.variant, &options)?;
    println!("{}", markup);
    Ok(())
}

/// Load the catalog, printing a source-annotated report for parse errors
fn load_catalog(path: &Path) -> Result<Catalog, Error> {
    Catalog::from_file(path).map_err(|err| {
        if matches!(err, CatalogError::Json(_) | CatalogError::Toml(_)) {
            if let Ok(source) = fs::read_to_string(path) {
                eprint!("{}", err.format(&source, &path.display().to_string()));
            }
        }
        Error::from(err)
    })
}
