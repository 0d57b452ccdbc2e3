use crate::catalog::loader::ReferenceListLoader;
use crate::catalog::store::Catalog;
use crate::catalog::violation::LoadError;
use crate::cli::{OutputFormat, SourceArgs};
use crate::utils::validation::tsv_field;

pub fn run(sources: &SourceArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = sources.to_config()?;

    if verbose {
        for source in config.sources() {
            eprintln!("Source: {source}");
        }
    }

    let documents = config.read_documents()?;
    let result = ReferenceListLoader::from_config(&config).load(&documents);

    match (&result, format) {
        (Ok(catalog), OutputFormat::Text) => print_text_summary(catalog, documents.len()),
        (Ok(catalog), OutputFormat::Json) => print_json_summary(catalog)?,
        (Ok(catalog), OutputFormat::Tsv) => print_tsv_summary(catalog),
        (Err(err), OutputFormat::Text) => eprintln!("{err}"),
        (Err(err), OutputFormat::Json) => print_json_violations(err)?,
        (Err(err), OutputFormat::Tsv) => print_tsv_violations(err),
    }

    match result {
        Ok(_) => Ok(()),
        Err(err) => anyhow::bail!("validation failed with {} violation(s)", err.len()),
    }
}

fn print_text_summary(catalog: &Catalog, document_count: usize) {
    println!("Validation Results");
    println!("{}", "=".repeat(60));
    println!(
        "\nOK: {} documents, {} lists, {} entries",
        document_count,
        catalog.len(),
        catalog.entry_count()
    );
    println!("Signature: {}", catalog.signature());

    println!();
    for list in catalog.lists() {
        print!("  {} ({} entries)", list.type_name, list.len());
        if let Some(source) = catalog.qualification_source(list.type_name.as_str()) {
            print!(" -> qualifications from {source}");
        }
        println!();
    }
}

fn print_json_summary(catalog: &Catalog) -> anyhow::Result<()> {
    let lists: Vec<_> = catalog
        .lists()
        .iter()
        .map(|list| {
            serde_json::json!({
                "type_full_name": list.type_name,
                "entries": list.len(),
                "qualification_source": catalog.qualification_source(list.type_name.as_str()),
            })
        })
        .collect();

    let output = serde_json::json!({
        "valid": true,
        "signature": catalog.signature(),
        "entry_count": catalog.entry_count(),
        "lists": lists,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(catalog: &Catalog) {
    println!("type_full_name\tentries\tqualification_source");
    for list in catalog.lists() {
        let source = catalog
            .qualification_source(list.type_name.as_str())
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{}\t{}\t{}", list.type_name, list.len(), source);
    }
}

fn print_json_violations(err: &LoadError) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "valid": false,
        "violations": err.violations(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_violations(err: &LoadError) {
    println!("kind\tmessage");
    for violation in err.violations() {
        println!("{}\t{}", violation.kind(), tsv_field(&violation.to_string()));
    }
}
