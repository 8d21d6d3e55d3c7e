//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use schemald_core::{Catalog, Converter, DatasetUris, FieldMapper};
use schemald_shared::{AppConfig, RecordId, init_config, load_config, load_config_from};
use serde_json::{Value, json};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// schemald: publish content records as schema.org JSON-LD.
#[derive(Parser)]
#[command(
    name = "schemald",
    version,
    about = "Convert content records into schema.org JSON-LD documents.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.schemald/schemald.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert catalog records to JSON-LD.
    Convert {
        /// Catalog JSON file holding records and entities.
        catalog: PathBuf,

        /// Convert only this record id (defaults to every record).
        #[arg(short, long)]
        record: Option<u64>,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,

        /// Wrap output as {"documents": ..., "references": [...]}.
        #[arg(long)]
        with_references: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is JSON-LD.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "schemald=info",
        1 => "schemald=debug",
        _ => "schemald=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            catalog,
            record,
            pretty,
            with_references,
        } => cmd_convert(
            cli.config.as_deref(),
            &catalog,
            record.map(RecordId),
            pretty,
            with_references,
        ),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(
    config_path: Option<&Path>,
    catalog_path: &Path,
    record: Option<RecordId>,
    pretty: bool,
    with_references: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;

    let mut catalog = Catalog::load(catalog_path)?;
    if config.settings.dataset_uri.is_some() {
        catalog = catalog.with_dataset(DatasetUris::from_settings(&config.settings)?);
    }

    let converter = Converter::new(
        FieldMapper::from(&config.schema),
        &config.settings,
        &catalog,
        &catalog,
        &catalog,
    );

    let mut references = Vec::new();
    let documents = match record {
        Some(id) => {
            let record = catalog
                .record(id)
                .ok_or_else(|| eyre!("record {id} not found in {}", catalog_path.display()))?;
            Value::Object(converter.convert(record, &mut references)?)
        }
        None => Value::Array(
            converter
                .convert_all(catalog.records(), &mut references)?
                .into_iter()
                .map(Value::Object)
                .collect::<Vec<_>>(),
        ),
    };

    info!(references = references.len(), "conversion complete");

    let output = render_output(documents, references, with_references);
    let text = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}

/// Shape the command output, optionally carrying the reference list.
fn render_output(documents: Value, references: Vec<String>, with_references: bool) -> Value {
    if with_references {
        json!({ "documents": documents, "references": references })
    } else {
        documents
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_flags() {
        let cli = Cli::try_parse_from([
            "schemald",
            "-vv",
            "convert",
            "catalog.json",
            "--record",
            "12",
            "--with-references",
        ])
        .expect("parse args");

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Convert {
                catalog,
                record,
                pretty,
                with_references,
            } => {
                assert_eq!(catalog, PathBuf::from("catalog.json"));
                assert_eq!(record, Some(12));
                assert!(!pretty);
                assert!(with_references);
            }
            Command::Config { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["schemald", "config", "show", "--config", "/tmp/s.toml"])
            .expect("parse args");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn output_wraps_references() {
        let out = render_output(json!([]), vec!["u1".into()], true);
        assert_eq!(out, json!({ "documents": [], "references": ["u1"] }));

        let out = render_output(json!({ "@id": "x" }), vec!["u1".into()], false);
        assert_eq!(out, json!({ "@id": "x" }));
    }

    #[test]
    fn converts_fixture_catalog() {
        let config = load_config_from(Path::new("../../fixtures/config/schemald.toml"))
            .expect("load fixture config");
        let catalog = Catalog::load(Path::new("../../fixtures/json/catalog.fixture.json"))
            .expect("load fixture catalog")
            .with_dataset(DatasetUris::from_settings(&config.settings).expect("dataset"));
        let converter = Converter::new(
            FieldMapper::from(&config.schema),
            &config.settings,
            &catalog,
            &catalog,
            &catalog,
        );

        let mut references = Vec::new();
        let docs = converter
            .convert_all(catalog.records(), &mut references)
            .expect("convert fixture");

        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0]["@type"], json!("BlogPosting"));
        assert_eq!(docs[0]["publisher"]["@type"], json!("Organization"));
        assert_eq!(
            docs[0]["mentions"],
            json!([
                { "@id": "http://data.example.org/blog/entity/rome" },
                { "@id": "http://data.example.org/blog/entity/acme_corp" }
            ])
        );
        assert_eq!(docs[2]["address"]["@type"], json!("PostalAddress"));
        assert_eq!(docs[2]["geo"]["latitude"], json!("41.9028"));
        assert_eq!(
            references,
            [
                "http://data.example.org/blog/entity/rome",
                "http://data.example.org/blog/entity/acme_corp",
            ]
        );
    }
}
