//! DOMJuice CLI
//!
//! Usage:
//!   domjuice [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -d, --data <FILE>     Data file (JSON if it ends in .json, TOML otherwise)
//!   -s, --set <KEY=VALUE> Inline string data, may be repeated
//!   -c, --config <FILE>   Binder configuration (TOML format)
//!       --strict          Fail when a directive's key has no data
//!       --sites           List directive sites instead of rendering
//!   -h, --help            Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use domjuice::{Binder, BinderConfig, Data, DefineError};

#[derive(Parser)]
#[command(name = "domjuice")]
#[command(about = "Bind data into markup templates with directive attributes")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    template: Option<PathBuf>,

    /// Data file (JSON if it ends in .json, TOML otherwise)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Inline string data as KEY=VALUE, overriding the data file
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,

    /// Binder configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when a directive's data key is missing
    #[arg(long)]
    strict: bool,

    /// List discovered directive sites instead of rendering
    #[arg(long)]
    sites: bool,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match BinderConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => BinderConfig::default(),
    };
    if cli.strict {
        config = config.strict();
    }

    // Load data
    let mut data = match &cli.data {
        Some(path) => match Data::from_file(path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error loading data '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Data::new(),
    };
    for (key, value) in cli.set {
        data.insert(key, value);
    }

    // Read template
    let (source, filename) = match &cli.template {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                process::exit(1);
            }
            (buffer, "<stdin>".to_string())
        }
    };

    let template = match Binder::with_config(config).define_markup(&source) {
        Ok(t) => t,
        Err(DefineError::Parse(errors)) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if cli.sites {
        for site in template.sites() {
            let path: Vec<String> = site.path.iter().map(|i| i.to_string()).collect();
            println!("{}\t{}\t/{}", site.kind, site.key, path.join("/"));
        }
        return;
    }

    match template.instantiate(&data) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
