use super::{OutputFormat, TextEncoding};
use crate::eval::{Dataset, EvaluationRecord};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const CSV_HEADER: &str = "password,entropy,strength,label";

/// `<dir>/<stem>_evaluated.<ext>` next to the input file
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "passwords".to_string());
    input.with_file_name(format!("{stem}_evaluated.{}", format.extension()))
}

/// Write the dataset rows in dataset order
pub fn write_dataset(
    path: &Path,
    dataset: &Dataset,
    format: OutputFormat,
    encoding: TextEncoding,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    render(&mut writer, dataset.records(), format, encoding)
        .with_context(|| format!("Error saving data to {}", path.display()))?;

    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", path.display()))?;
    Ok(())
}

fn render<W: Write>(
    out: &mut W,
    records: &[EvaluationRecord],
    format: OutputFormat,
    encoding: TextEncoding,
) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            writeln!(out, "{CSV_HEADER}")?;
            for record in records {
                let row = format!(
                    "{},{:?},{:?},{}\n",
                    escape_csv_field(&record.sample),
                    record.entropy,
                    record.strength_score,
                    record.label
                );
                out.write_all(&encoding.encode(&row))?;
            }
        }
        OutputFormat::Jsonl => {
            for record in records {
                let mut line = serde_json::to_string(record)?;
                line.push('\n');
                out.write_all(&encoding.encode(&line))?;
            }
        }
    }
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, line break or
/// surrounding whitespace; embedded quotes are doubled.
fn escape_csv_field(field: &str) -> String {
    let needs_quotes = field.contains([',', '"', '\n', '\r'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace);

    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
