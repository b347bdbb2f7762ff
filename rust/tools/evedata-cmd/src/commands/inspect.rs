//! Inspect command implementation

use std::io::Write;

use anyhow::{Context, Result};
use evedata_file::{DataFile, SnapshotFile};
use evedata_format::{Attributes, MetaData, Section};
use evedata_sequence::{DataSeries, Series};
use serde::Serialize;

use crate::commands::open_file;

#[derive(Serialize)]
struct InspectSummary {
    file_metadata: Attributes,
    chains: Vec<ChainInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ChainInfo {
    id: i32,
    metadata: Attributes,
    preferred: Vec<String>,
    sections: Vec<SectionInfo>,
}

#[derive(Serialize)]
struct SectionInfo {
    section: String,
    devices: Vec<DeviceInfo>,
}

#[derive(Serialize)]
struct DeviceInfo {
    id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    unit: String,
    device_type: String,
    #[serde(rename = "type")]
    data_type: String,
    dimension: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    normalize_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<Attributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<SeriesInfo>,
}

#[derive(Serialize)]
struct SeriesInfo {
    sample_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_pos_ref: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_pos_ref: Option<i32>,
    has_average_data: bool,
    has_std_deviation: bool,
}

const SECTIONS: [Section; 3] = [Section::Standard, Section::Snapshot, Section::Monitor];

/// Run the inspect command
pub fn run(verbose: u8, path: String) -> Result<()> {
    let mut file = open_file(&path)?;
    let summary = create_summary(&mut file, verbose)?;
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;
    Ok(())
}

fn create_summary(file: &mut SnapshotFile, verbose: u8) -> Result<InspectSummary> {
    let selected = file.chain();
    let mut chains = Vec::new();
    for id in file.chains() {
        file.set_chain(id)
            .with_context(|| format!("Failed to select chain {id}"))?;
        chains.push(create_chain_info(file, verbose)?);
    }
    if !chains.is_empty() {
        file.set_chain(selected)?;
    }
    tracing::info!(chains = chains.len(), "inspected file");

    Ok(InspectSummary {
        file_metadata: file.file_metadata().clone(),
        chains,
        log: (verbose > 0).then(|| file.log_data().to_vec()),
    })
}

fn create_chain_info(file: &SnapshotFile, verbose: u8) -> Result<ChainInfo> {
    let sections = SECTIONS
        .iter()
        .map(|&section| -> Result<SectionInfo> {
            let metadata = file.metadata(section, "");
            let series = if verbose > 1 {
                Some(file.data(&metadata).with_context(|| {
                    format!("Failed to read {section} data of chain {}", file.chain())
                })?)
            } else {
                None
            };
            let devices = metadata
                .iter()
                .enumerate()
                .map(|(i, meta)| {
                    create_device_info(meta, verbose, series.as_ref().map(|s| &s[i]))
                })
                .collect();
            Ok(SectionInfo {
                section: section.to_string(),
                devices,
            })
        })
        .filter(|info| !matches!(info, Ok(info) if info.devices.is_empty()))
        .collect::<Result<Vec<_>>>()?;

    Ok(ChainInfo {
        id: file.chain(),
        metadata: file.chain_metadata().clone(),
        preferred: file.preferred_ids().to_vec(),
        sections,
    })
}

fn create_device_info(
    meta: &MetaData,
    verbose: u8,
    series: Option<&Series>,
) -> DeviceInfo {
    DeviceInfo {
        id: meta.id.clone(),
        name: meta.name.clone(),
        unit: meta.unit.clone(),
        device_type: meta.device_type.to_string(),
        data_type: meta.data_type.to_string(),
        dimension: (meta.dimension.rows, meta.dimension.columns),
        normalize_id: meta.normalize_id.clone(),
        attributes: (verbose > 0 && !meta.attributes.is_empty()).then(|| meta.attributes.clone()),
        series: series.map(|s| SeriesInfo {
            sample_count: s.len(),
            first_pos_ref: s.pos_refs().first().copied(),
            last_pos_ref: s.pos_refs().last().copied(),
            has_average_data: s.has_average_data(),
            has_std_deviation: s.has_std_deviation(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use evedata_testkit::fixtures;

    use super::*;

    fn summary(verbose: u8) -> serde_json::Value {
        let file = fixtures::snapshot_file().unwrap();
        let mut file = SnapshotFile::open(file.path()).unwrap();
        let summary = create_summary(&mut file, verbose).unwrap();
        assert_eq!(file.chain(), 1);
        serde_json::to_value(summary).unwrap()
    }

    #[test]
    fn test_summary_lists_sections_per_chain() {
        let summary = summary(0);
        let chains = summary["chains"].as_array().unwrap();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0]["id"], 1);
        let sections = chains[0]["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["section"], "standard");
        assert_eq!(sections[0]["devices"].as_array().unwrap().len(), 3);
        assert_eq!(sections[1]["section"], "monitor");
        assert_eq!(sections[0]["devices"][2]["dimension"], serde_json::json!([2, 3]));
        assert!(chains[1]["sections"].as_array().unwrap().is_empty());
        assert!(summary.get("log").is_none());
        assert!(sections[0]["devices"][0].get("series").is_none());
    }

    #[test]
    fn test_verbose_summary_reads_series() {
        let summary = summary(2);
        assert_eq!(summary["log"][0], "scan started");
        let chan = &summary["chains"][0]["sections"][0]["devices"][1];
        assert_eq!(chan["id"], "SimChan:chan");
        assert_eq!(chan["series"]["sample_count"], 3);
        assert_eq!(chan["series"]["first_pos_ref"], 1);
        assert_eq!(chan["series"]["has_std_deviation"], true);
    }
}
