//! ClimateWash command-line interface.
//!
//! Thin glue over `climatewash-core`: loads a catalog, reads an AI
//! findings payload, runs the engine, and renders the result. No
//! scoring logic lives here.

mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use climatewash_core::{
    diagnose, CriteriaCatalog, DiagnosisConfig, DirectiveScope, Modality, RawFinding,
    RubricVersion,
};

#[derive(Parser)]
#[command(name = "climatewash", version, about = "Greenwashing-risk diagnosis engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score an AI findings payload against the rubric
    Diagnose {
        /// Findings payload (JSON array), or "-" for stdin
        #[arg(long)]
        findings: String,

        /// Catalog file (YAML or JSON); defaults to the built-in rubric
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "v1-full")]
        rubric_version: VersionArg,

        #[arg(long, value_enum, default_value = "both")]
        scope: ScopeArg,

        #[arg(long, value_enum, default_value = "text")]
        modality: ModalityArg,

        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// List the criteria active under a scope and rubric version
    Criteria {
        /// Catalog file (YAML or JSON); defaults to the built-in rubric
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "v1-full")]
        rubric_version: VersionArg,

        #[arg(long, value_enum, default_value = "both")]
        scope: ScopeArg,
    },

    /// Validate a catalog file against the schema
    Validate {
        /// Catalog file (YAML or JSON)
        catalog: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VersionArg {
    V1Full,
    V2KeyItems,
    V3ClimateFocus,
}

impl From<VersionArg> for RubricVersion {
    fn from(v: VersionArg) -> Self {
        match v {
            VersionArg::V1Full => RubricVersion::V1Full,
            VersionArg::V2KeyItems => RubricVersion::V2KeyItems,
            VersionArg::V3ClimateFocus => RubricVersion::V3ClimateFocus,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    EmpowermentOnly,
    Both,
}

impl From<ScopeArg> for DirectiveScope {
    fn from(s: ScopeArg) -> Self {
        match s {
            ScopeArg::EmpowermentOnly => DirectiveScope::EmpowermentOnly,
            ScopeArg::Both => DirectiveScope::Both,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModalityArg {
    Text,
    Image,
    Pdf,
    Video,
    Web,
}

impl From<ModalityArg> for Modality {
    fn from(m: ModalityArg) -> Self {
        match m {
            ModalityArg::Text => Modality::Text,
            ModalityArg::Image => Modality::Image,
            ModalityArg::Pdf => Modality::Pdf,
            ModalityArg::Video => Modality::Video,
            ModalityArg::Web => Modality::Web,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Diagnose {
            findings,
            catalog,
            rubric_version,
            scope,
            modality,
            format,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let raw = read_findings(&findings)?;
            let config = DiagnosisConfig {
                directive_scope: scope.into(),
                rubric_version: rubric_version.into(),
                modality: modality.into(),
            };

            let result = diagnose(&catalog, config, raw);

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                Format::Text => print!("{}", render::render_result(&result)),
            }
        }

        Command::Criteria {
            catalog,
            rubric_version,
            scope,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let active = catalog.active_criteria(scope.into(), rubric_version.into());
            print!("{}", render::render_criteria(&catalog, &active));
        }

        Command::Validate { catalog } => {
            validate_catalog(&catalog)?;
            println!("OK: {} is a valid catalog", catalog.display());
        }
    }

    Ok(())
}

/// Load a catalog from a file, or the built-in rubric when none given.
fn load_catalog(path: Option<&Path>) -> Result<CriteriaCatalog> {
    let catalog = match path {
        None => CriteriaCatalog::builtin(),
        Some(path) => {
            let loaded = if path.extension().is_some_and(|e| e == "json") {
                CriteriaCatalog::from_json_file(path)
            } else {
                CriteriaCatalog::from_yaml_file(path)
            };
            loaded.with_context(|| format!("failed to load catalog {}", path.display()))?
        }
    };

    tracing::debug!(
        name = %catalog.name,
        criteria = catalog.criteria.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Read the raw findings payload from a file or stdin.
fn read_findings(source: &str) -> Result<Vec<RawFinding>> {
    let contents = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read findings from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read findings file {source}"))?
    };

    serde_json::from_str(&contents).context("findings payload is not a JSON array of findings")
}

/// Schema-validate then parse a catalog file, reporting all problems.
fn validate_catalog(path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path.extension().is_some_and(|e| e == "json");

    let value: serde_json::Value = if is_json {
        serde_json::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };

    if let Err(errors) = climatewash_core::catalog::validate_catalog_schema(&value) {
        for error in &errors {
            eprintln!("schema: {error}");
        }
        bail!("{} failed schema validation", path.display());
    }

    // Structural checks the schema cannot express (unique ids, range
    // ordering).
    let parsed = if is_json {
        CriteriaCatalog::from_json(&contents)
    } else {
        CriteriaCatalog::from_yaml(&contents)
    };
    parsed
        .map(|_| ())
        .with_context(|| format!("{} failed catalog validation", path.display()))
}
