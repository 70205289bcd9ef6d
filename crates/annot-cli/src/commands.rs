use std::fs;
use std::path::Path;

use annot_ingest::write_table;
use annot_model::{Schema, ValidationReport};
use annot_standards::annotation_schema;
use annot_validate::{Submission, Validator, report_to_frame};
use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use crate::cli::{SchemaArgs, ValidateArgs};
use crate::summary::{apply_table_style, describe_checks};

/// Built-in schema, or the JSON schema at `path`.
pub fn load_schema(path: Option<&Path>) -> Result<Schema> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read schema {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parse schema {}", path.display()))
        }
        None => annotation_schema().context("build annotation schema"),
    }
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let span = info_span!("validate_file", file = %args.file.display());
    let _guard = span.enter();

    let mut schema = load_schema(args.schema.as_deref())?;
    if args.no_strict {
        schema = schema.with_strict(false);
    }
    if let Some(mode) = args.report_duplicates {
        schema = schema.with_report_duplicates(mode.into());
    }

    let validator = Validator::new().with_parallel(!args.serial);
    let report = validator.validate_submission(Submission::Path(args.file.clone()), &schema);

    if let Some(output) = &args.output {
        let frame = report_to_frame(&report).context("build failure case table")?;
        write_table(&frame, output)
            .with_context(|| format!("write report {}", output.display()))?;
        info!(path = %output.display(), failure_count = report.len(), "report written");
    }
    Ok(report)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = annotation_schema().context("build annotation schema")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }
    println!(
        "{} {}",
        schema.title().unwrap_or("Schema"),
        schema.version().unwrap_or_default()
    );
    let mut table = Table::new();
    table.set_header(vec![
        "Column", "Type", "Required", "Nullable", "Coerce", "Checks",
    ]);
    apply_table_style(&mut table);
    for spec in schema.columns() {
        let name = if spec.is_pattern {
            format!("{}*", spec.name)
        } else {
            spec.name.clone()
        };
        table.add_row(vec![
            name,
            spec.value_type.to_string(),
            yes_no(spec.required),
            yes_no(spec.nullable),
            yes_no(schema.coerces(spec)),
            describe_checks(&spec.checks),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}
