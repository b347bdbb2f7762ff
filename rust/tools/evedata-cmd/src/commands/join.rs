//! Join command implementation

use std::io::Write;

use anyhow::{Context, Result};
use arrow::{record_batch::RecordBatch, util::pretty::pretty_format_batches};
use evedata_arrow_compat::joined_table_to_record_batch;
use evedata_file::{DataFile, SnapshotFile};
use evedata_format::{FillRule, Section};
use evedata_join::JoinedTable;

use crate::commands::open_file;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table
    Table,
    /// CSV with a header line (scalar columns only)
    Csv,
    /// JSON array of row objects
    Json,
}

/// Which devices of the chain are joined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The preferred devices of the chain.
    Preferred,
    /// Every device of the section.
    Section(Section),
    /// The listed devices of the section, in this order.
    Ids { section: Section, ids: Vec<String> },
}

pub struct JoinOptions {
    pub chain: Option<i32>,
    pub selection: Selection,
    pub fill: FillRule,
    pub format: OutputFormat,
    pub limit: Option<usize>,
}

/// Run the join command, writing the table to `out`
pub fn run(path: String, options: JoinOptions, out: &mut impl Write) -> Result<()> {
    let mut file = open_file(&path)?;
    if let Some(chain) = options.chain {
        file.set_chain(chain)
            .with_context(|| format!("Failed to select chain {chain}"))?;
    }

    let table = joined_table(&file, &options.selection, options.fill)?;
    tracing::info!(
        chain = file.chain(),
        rows = table.row_count(),
        columns = table.column_count(),
        fill = %options.fill,
        "joined table"
    );
    for column in table.columns() {
        tracing::debug!(
            column = %column.meta().id,
            policy = ?column.fill_policy(),
            summary = ?column.fill_summary(),
            "column fill"
        );
    }

    let batch = joined_table_to_record_batch(&table)
        .context("Failed to convert joined table to Arrow")?;
    let batch = match options.limit {
        Some(limit) if limit < batch.num_rows() => batch.slice(0, limit),
        _ => batch,
    };
    write_batch(&batch, options.format, out)
}

fn joined_table(file: &SnapshotFile, selection: &Selection, fill: FillRule) -> Result<JoinedTable> {
    match selection {
        Selection::Preferred => file
            .preferred_data(fill)
            .with_context(|| format!("Failed to join preferred devices of chain {}", file.chain())),
        Selection::Section(section) => {
            let metadata = file.metadata(*section, "");
            file.joined_data(&metadata, fill)
                .with_context(|| format!("Failed to join {section} devices"))
        }
        Selection::Ids { section, ids } => {
            let available = file.metadata(*section, "");
            let metadata = ids
                .iter()
                .map(|id| {
                    available
                        .iter()
                        .find(|meta| &meta.id == id)
                        .cloned()
                        .with_context(|| {
                            format!(
                                "Device '{id}' not found in {section} section of chain {}",
                                file.chain()
                            )
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            file.joined_data(&metadata, fill)
                .context("Failed to join selected devices")
        }
    }
}

fn write_batch(batch: &RecordBatch, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let table = pretty_format_batches(std::slice::from_ref(batch))?;
            writeln!(out, "{table}")?;
        }
        OutputFormat::Csv => {
            let mut writer = arrow_csv::WriterBuilder::new()
                .with_header(true)
                .build(&mut *out);
            writer
                .write(batch)
                .context("Failed to write CSV (array columns need table or json output)")?;
        }
        OutputFormat::Json => {
            {
                let mut writer = arrow_json::ArrayWriter::new(&mut *out);
                writer.write(batch).context("Failed to write JSON")?;
                writer.finish()?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use evedata_testkit::fixtures;

    use super::*;

    fn run_to_string(selection: Selection, fill: FillRule, format: OutputFormat) -> Result<String> {
        run_with_limit(selection, fill, format, None)
    }

    fn run_with_limit(
        selection: Selection,
        fill: FillRule,
        format: OutputFormat,
        limit: Option<usize>,
    ) -> Result<String> {
        let file = fixtures::snapshot_file()?;
        let options = JoinOptions {
            chain: None,
            selection,
            fill,
            format,
            limit,
        };
        let mut out = Vec::new();
        run(file.path().display().to_string(), options, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_preferred_csv() {
        let csv = run_to_string(Selection::Preferred, FillRule::NoFill, OutputFormat::Csv).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines, ["posref,SimMt:axis,SimChan:chan", "1,10,0.5", "4,13,0.9"]);
    }

    #[test]
    fn test_selected_ids_json() {
        let selection = Selection::Ids {
            section: Section::Standard,
            ids: vec!["SimChan:chan".to_string(), "SimMt:axis".to_string()],
        };
        let json = run_to_string(selection, FillRule::LastFill, OutputFormat::Json).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2]["posref"], 3);
        assert_eq!(rows[2]["SimMt:axis"], 11);
        assert_eq!(rows[2]["SimChan:chan"], 0.7);
        assert!(rows[1].get("SimChan:chan").is_none());
    }

    #[test]
    fn test_section_table_with_limit() {
        let table = run_with_limit(
            Selection::Section(Section::Standard),
            FillRule::LastNANFill,
            OutputFormat::Table,
            Some(2),
        )
        .unwrap();
        assert!(table.contains("SimChan:spectrum"));
        assert!(table.contains("| 1 "));
        assert!(!table.contains("| 3 "));
    }

    #[test]
    fn test_unknown_device_fails() {
        let selection = Selection::Ids {
            section: Section::Monitor,
            ids: vec!["SimMt:axis".to_string()],
        };
        let err = run_to_string(selection, FillRule::NoFill, OutputFormat::Csv).unwrap_err();
        assert!(err.to_string().contains("SimMt:axis"));
    }

    #[test]
    fn test_array_columns_reject_csv() {
        let err = run_to_string(
            Selection::Section(Section::Standard),
            FillRule::NoFill,
            OutputFormat::Csv,
        )
        .unwrap_err();
        assert!(err.to_string().contains("CSV"));
    }
}
