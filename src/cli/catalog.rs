use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::Catalog;
use crate::cli::{load_catalog, OutputFormat, SourceArgs};
use crate::core::entry::ReferenceEntry;
use crate::core::list::ReferenceList;
use crate::core::types::EntryId;
use crate::utils::validation::tsv_field;

#[derive(Args)]
pub struct ListArgs {
    /// List to show (full or short name). Omit to list all lists
    pub type_name: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// List name (full or short)
    #[arg(required = true)]
    pub type_name: String,

    /// Entry Id or Value
    #[arg(required = true)]
    pub key: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file path
    #[arg(required = true)]
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

pub fn run_list(
    args: &ListArgs,
    sources: &SourceArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(sources)?;

    if verbose {
        eprintln!(
            "Loaded {} lists ({} entries)",
            catalog.len(),
            catalog.entry_count()
        );
    }

    match &args.type_name {
        None => print_lists(&catalog, format)?,
        Some(name) => {
            let list = catalog.find_list(name)?;
            print_entries(list, format)?;
        }
    }

    Ok(())
}

pub fn run_show(
    args: &ShowArgs,
    sources: &SourceArgs,
    format: OutputFormat,
    _verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(sources)?;
    let entry = lookup(&catalog, &args.type_name, &args.key)?;
    let qualifications = catalog.required_qualifications(&args.type_name, entry.id)?;

    match format {
        OutputFormat::Text => {
            let list = catalog.resolve_type_name(&args.type_name)?;
            println!("List:        {list}");
            println!("Id:          {}", entry.id);
            println!("Value:       {}", entry.value);
            println!("Description: {}", entry.description);
            if !qualifications.is_empty() {
                println!("Required qualifications:");
                for q in &qualifications {
                    println!("  {} ({})", q.value, q.id);
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "type_full_name": catalog.resolve_type_name(&args.type_name)?,
                "entry": entry,
                "required_qualifications": qualifications,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tvalue\tdescription\trequired_qualifications");
            print_entry_tsv(entry, &qualifications);
        }
    }

    Ok(())
}

pub fn run_export(
    args: &ExportArgs,
    sources: &SourceArgs,
    _format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let catalog = load_catalog(sources)?;
    std::fs::write(&args.output, catalog.to_json()?)?;

    if verbose {
        eprintln!("Signature: {}", catalog.signature());
    }
    eprintln!(
        "Exported {} lists ({} entries) to {}",
        catalog.len(),
        catalog.entry_count(),
        args.output.display()
    );
    Ok(())
}

/// Look an entry up by Id when `key` is a UUID, otherwise by Value
fn lookup<'a>(catalog: &'a Catalog, type_name: &str, key: &str) -> anyhow::Result<&'a ReferenceEntry> {
    let entry = match EntryId::parse(key) {
        Ok(id) => catalog.get(type_name, id)?,
        Err(_) => catalog.get_by_value(type_name, key)?,
    };
    Ok(entry)
}

fn print_lists(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{:<70} {:>8}", "List", "Entries");
            println!("{}", "-".repeat(79));
            for list in catalog.lists() {
                println!("{:<70} {:>8}", list.type_name.as_str(), list.len());
            }
            println!("\nTotal: {} lists", catalog.len());
        }
        OutputFormat::Json => {
            let lists: Vec<_> = catalog
                .lists()
                .iter()
                .map(|list| {
                    serde_json::json!({
                        "type_full_name": list.type_name,
                        "short_name": list.type_name.short_name(),
                        "entries": list.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&lists)?);
        }
        OutputFormat::Tsv => {
            println!("type_full_name\tshort_name\tentries");
            for list in catalog.lists() {
                println!(
                    "{}\t{}\t{}",
                    list.type_name,
                    list.type_name.short_name(),
                    list.len()
                );
            }
        }
    }
    Ok(())
}

fn print_entries(list: &ReferenceList, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{} ({} entries)", list.type_name, list.len());
            println!("{}", "=".repeat(60));
            for entry in &list.entries {
                println!("{}  {}", entry.id, entry.value);
                if !entry.description.is_empty() {
                    println!("    {}", entry.description);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(list)?);
        }
        OutputFormat::Tsv => {
            println!("id\tvalue\tdescription\trequired_qualifications");
            for entry in &list.entries {
                print_entry_tsv(entry, &[]);
            }
        }
    }
    Ok(())
}

/// One TSV row. Resolved qualifications print as values; without them the raw ids are used.
fn print_entry_tsv(entry: &ReferenceEntry, resolved: &[&ReferenceEntry]) {
    let quals: Vec<String> = if resolved.is_empty() {
        entry
            .required_qualifications
            .iter()
            .map(|q| q.id.to_string())
            .collect()
    } else {
        resolved.iter().map(|q| q.value.clone()).collect()
    };
    println!(
        "{}\t{}\t{}\t{}",
        entry.id,
        tsv_field(&entry.value),
        tsv_field(&entry.description),
        tsv_field(&quals.join(","))
    );
}
