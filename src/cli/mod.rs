//! Command-line interface for predef-catalog.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **validate**: Load every configured source and report all violations
//! - **list**: List the loaded reference lists, or the entries of one list
//! - **show**: Show one entry by Id or Value
//! - **export**: Write the loaded catalog as a reloadable JSON bundle
//!
//! ## Usage
//!
//! ```text
//! # Check the embedded predefined lists
//! predef-catalog validate
//!
//! # Check a directory of definition files
//! predef-catalog validate --dir ./PreDefs
//!
//! # Look up an entry
//! predef-catalog show WatchShiftType JOOD
//!
//! # JSON output for scripting
//! predef-catalog list DutyStatus --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::catalog::loader::ReferenceListLoader;
use crate::catalog::store::Catalog;
use crate::config::LoaderConfig;

pub mod catalog;
pub mod validate;

#[derive(Parser)]
#[command(name = "predef-catalog")]
#[command(version)]
#[command(about = "Load, validate and query predefined reference lists")]
#[command(
    long_about = "predef-catalog loads reference-list definition documents (duty statuses, watch shift types, watch qualifications, ...), validates them and resolves cross-list references.\n\nA load either succeeds completely or reports every violation found:\n- Malformed documents and entries\n- Duplicate list names, Ids and Values\n- Required qualifications that do not resolve"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate definition documents and report every violation
    Validate,

    /// List reference lists, or the entries of one list
    List(catalog::ListArgs),

    /// Show a single entry
    Show(catalog::ShowArgs),

    /// Export the loaded catalog as a JSON bundle
    Export(catalog::ExportArgs),
}

/// Where definitions come from and how lists are cross-referenced
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Loader configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of definition files (.json, .cc); can be given multiple times
    #[arg(short, long = "dir", global = true)]
    pub dirs: Vec<PathBuf>,

    /// Definition file or bundle; can be given multiple times
    #[arg(long = "file", global = true)]
    pub files: Vec<PathBuf>,

    /// Also load the embedded predefined lists alongside --dir/--file sources
    #[arg(long, global = true)]
    pub embedded: bool,

    /// Never load the embedded predefined lists
    #[arg(long, global = true, conflicts_with = "embedded")]
    pub no_embedded: bool,

    /// Qualification source mapping, e.g. WatchShiftType=WatchQualification
    #[arg(long = "qualification-source", value_name = "LIST=SOURCE", global = true)]
    pub qualification_sources: Vec<String>,
}

impl SourceArgs {
    /// Merge the config file (if any) with command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or a mapping is malformed.
    pub fn to_config(&self) -> anyhow::Result<LoaderConfig> {
        let mut config = match &self.config {
            Some(path) => LoaderConfig::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => LoaderConfig::default(),
        };

        config.directories.extend(self.dirs.iter().cloned());
        config.files.extend(self.files.iter().cloned());
        if self.embedded {
            config.include_embedded = Some(true);
        } else if self.no_embedded {
            config.include_embedded = Some(false);
        }
        for spec in &self.qualification_sources {
            config.add_qualification_source(spec)?;
        }

        Ok(config)
    }
}

/// Read and load every configured source
///
/// # Errors
///
/// Returns an error if a source cannot be read or the definitions fail validation.
pub fn load_catalog(sources: &SourceArgs) -> anyhow::Result<Catalog> {
    let config = sources.to_config()?;
    let documents = config.read_documents()?;
    let catalog = ReferenceListLoader::from_config(&config).load(&documents)?;
    Ok(catalog)
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::violation::{LoadError, Violation};

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_source_args_overrides() {
        let args = SourceArgs {
            dirs: vec![PathBuf::from("predefs")],
            embedded: true,
            qualification_sources: vec!["WatchStation=WatchQualification".to_string()],
            ..SourceArgs::default()
        };
        let config = args.to_config().unwrap();
        assert!(config.includes_embedded());
        assert_eq!(config.directories, vec![PathBuf::from("predefs")]);
        assert_eq!(config.qualification_sources.len(), 2);
    }

    #[test]
    fn test_source_args_bad_mapping() {
        let args = SourceArgs {
            qualification_sources: vec!["WatchStation".to_string()],
            ..SourceArgs::default()
        };
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_short_name_override_replaces_default_mapping() {
        let args = SourceArgs {
            qualification_sources: vec!["WatchShiftType=WatchbillStatus".to_string()],
            ..SourceArgs::default()
        };
        let err = load_catalog(&args).unwrap_err();
        let err = err.downcast_ref::<LoadError>().unwrap();
        assert!(err.count_of("unresolved_reference") > 0);
        assert_eq!(err.count_of("conflicting_qualification_sources"), 0);
        assert!(err.violations().iter().all(|v| matches!(
            v,
            Violation::UnresolvedReference { source_list, .. }
                if source_list.short_name() == "WatchbillStatus"
        )));
    }

    #[test]
    fn test_load_embedded_by_default() {
        let catalog = load_catalog(&SourceArgs::default()).unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
