// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::{feet_to_meters, parse_number, AirportId, AirportRecord};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Individual warnings logged per file before falling back to a summary line.
const MAX_ROW_WARNINGS: usize = 5;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub rows: usize,
    pub missing_elevation: usize,
    pub missing_coordinates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryGroup {
    pub code: String,
    pub members: Vec<AirportId>,
}

/// Records in file order plus their grouping by country code.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<AirportRecord>,
    groups: Vec<CountryGroup>,
    index: HashMap<String, usize>,
    report: IngestReport,
}

impl Dataset {
    /// Groups `records` by country code in a single pass. Both the groups and
    /// the members of each group keep their first-seen order.
    pub fn from_records(records: Vec<AirportRecord>) -> Self {
        let mut groups: Vec<CountryGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut report = IngestReport {
            rows: records.len(),
            ..Default::default()
        };

        for (i, record) in records.iter().enumerate() {
            if record.elevation_m.is_none() {
                report.missing_elevation += 1;
            }
            if !record.is_plottable() {
                report.missing_coordinates += 1;
            }

            let slot = match index.get(&record.country_code) {
                Some(&slot) => slot,
                None => {
                    groups.push(CountryGroup {
                        code: record.country_code.clone(),
                        members: Vec::new(),
                    });
                    index.insert(record.country_code.clone(), groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[slot].members.push(AirportId(i));
        }

        Self {
            records,
            groups,
            index,
            report,
        }
    }

    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: AirportId) -> Option<&AirportRecord> {
        self.records.get(id.0)
    }

    pub fn groups(&self) -> &[CountryGroup] {
        &self.groups
    }

    pub fn report(&self) -> IngestReport {
        self.report
    }

    /// Airports of one country in file order. Unknown codes yield nothing.
    pub fn group<'a>(
        &'a self,
        code: &str,
    ) -> impl Iterator<Item = (AirportId, &'a AirportRecord)> + 'a {
        let members: &'a [AirportId] = self
            .index
            .get(code)
            .map(|&slot| self.groups[slot].members.as_slice())
            .unwrap_or_default();
        members.iter().map(move |&id| (id, &self.records[id.0]))
    }

    /// First record whose ident matches exactly.
    pub fn find_ident(&self, ident: &str) -> Option<(AirportId, &AirportRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.ident == ident)
            .map(|(i, r)| (AirportId(i), r))
    }
}

struct Columns {
    ident: usize,
    name: usize,
    elevation_ft: usize,
    iso_country: usize,
    municipality: usize,
    longitude: usize,
    latitude: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let find = |names: &[&'static str]| -> Result<usize, IngestError> {
            headers
                .iter()
                .position(|h| {
                    let h = h.trim().trim_start_matches('\u{feff}');
                    names.iter().any(|n| h.eq_ignore_ascii_case(n))
                })
                .ok_or(IngestError::MissingColumn(names[0]))
        };

        Ok(Self {
            ident: find(&["ident"])?,
            name: find(&["name"])?,
            elevation_ft: find(&["elevation_ft"])?,
            iso_country: find(&["iso_country"])?,
            municipality: find(&["municipality"])?,
            longitude: find(&["longitude", "longitude_deg"])?,
            latitude: find(&["latitude", "latitude_deg"])?,
        })
    }
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

/// Parses uploaded CSV bytes into a grouped [`Dataset`].
///
/// Fails only when the text cannot be tokenized or a required column is
/// absent. Bad numbers inside a row become `None` on the record.
pub fn ingest(bytes: &[u8]) -> Result<Dataset, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns = Columns::resolve(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut warned = 0usize;
    let mut skipped_blank = 0usize;

    for result in rdr.records() {
        let row = result?;
        if row.iter().all(|f| f.trim().is_empty()) {
            skipped_blank += 1;
            continue;
        }

        let elevation_raw = field(&row, columns.elevation_ft);
        let lon_raw = field(&row, columns.longitude);
        let lat_raw = field(&row, columns.latitude);

        let record = AirportRecord {
            ident: field(&row, columns.ident).trim().to_string(),
            name: field(&row, columns.name).trim().to_string(),
            elevation_m: parse_number(elevation_raw)
                .map(feet_to_meters)
                .filter(|m| m.is_finite()),
            country_code: field(&row, columns.iso_country).trim().to_string(),
            municipality: field(&row, columns.municipality).trim().to_string(),
            longitude: parse_number(lon_raw),
            latitude: parse_number(lat_raw),
        };

        if record.elevation_m.is_none() || !record.is_plottable() {
            if warned < MAX_ROW_WARNINGS {
                let line = row.position().map(|p| p.line()).unwrap_or(0);
                warn!(
                    "Unparsable numeric field — line={} ident={} elevation_ft={:?} longitude={:?} latitude={:?}",
                    line, record.ident, elevation_raw, lon_raw, lat_raw
                );
            }
            warned += 1;
        }

        records.push(record);
    }

    if warned > MAX_ROW_WARNINGS {
        warn!(
            "{} more rows with unparsable numeric fields not shown",
            warned - MAX_ROW_WARNINGS
        );
    }
    if skipped_blank > 0 {
        debug!("Skipped {} blank rows", skipped_blank);
    }

    let dataset = Dataset::from_records(records);
    info!(
        "Ingested {} airports in {} countries",
        dataset.len(),
        dataset.groups().len()
    );
    Ok(dataset)
}

pub fn ingest_file<P: AsRef<Path>>(path: P) -> Result<Dataset, IngestError> {
    let bytes = fs::read(path.as_ref())?;
    debug!(
        "Read airport file — path={} bytes={}",
        path.as_ref().display(),
        bytes.len()
    );
    ingest(&bytes)
}
