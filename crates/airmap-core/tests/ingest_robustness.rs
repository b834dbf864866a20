// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Ingestion of messy real-world exports: OurAirports column names, extra
// columns, quoting, ragged rows and bad numbers.

use airmap_core::ingest::{ingest, ingest_file, IngestError};
use airmap_core::render::Scene;
use airmap_core::Session;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_ourairports_export_columns() {
    // Column order and names as in the public airports.csv dump.
    let data = "\
\"id\",\"ident\",\"type\",\"name\",\"latitude_deg\",\"longitude_deg\",\"elevation_ft\",\"continent\",\"iso_country\",\"iso_region\",\"municipality\"
3622,\"EPWA\",\"large_airport\",\"Warsaw Chopin Airport\",52.165699,20.967100,362,\"EU\",\"PL\",\"PL-14\",\"Warsaw\"
3623,\"EPKK\",\"large_airport\",\"Kraków John Paul II International Airport\",50.077702,19.784800,791,\"EU\",\"PL\",\"PL-12\",\"Kraków\"
";
    let dataset = ingest(data.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 2);

    let epwa = &dataset.records()[0];
    assert_eq!(epwa.ident, "EPWA");
    assert_eq!(epwa.longitude, Some(20.9671));
    assert_eq!(epwa.latitude, Some(52.165699));
    assert_eq!(epwa.elevation_m, Some(110.34));

    let epkk = &dataset.records()[1];
    assert_eq!(epkk.municipality, "Kraków");
    assert_eq!(epkk.elevation_m, Some(241.1));
}

#[test]
fn test_quoted_commas_stay_in_one_field() {
    let data = "\
ident,name,elevation_ft,iso_country,municipality,longitude,latitude
KJFK,\"John F. Kennedy, International\",13,US,\"New York, NY\",-73.7781,40.6413
";
    let dataset = ingest(data.as_bytes()).unwrap();
    let jfk = &dataset.records()[0];
    assert_eq!(jfk.name, "John F. Kennedy, International");
    assert_eq!(jfk.hover_label(), "John F. Kennedy, International, New York, NY");
}

#[test]
fn test_bad_numbers_are_kept_and_flagged() {
    let data = "\
ident,name,elevation_ft,iso_country,municipality,longitude,latitude
AAAA,Fine,100,US,Here,-90,30
BBBB,No Elevation,,US,There,-91,31
CCCC,Garbage Coords,50,US,Nowhere,west,north
DDDD,Short Row,10,GB
";
    let dataset = ingest(data.as_bytes()).unwrap();

    // Every non-empty row survives.
    assert_eq!(dataset.len(), 4);
    let report = dataset.report();
    assert_eq!(report.rows, 4);
    assert_eq!(report.missing_elevation, 1);
    assert_eq!(report.missing_coordinates, 2);

    let short = &dataset.records()[3];
    assert_eq!(short.country_code, "GB");
    assert_eq!(short.municipality, "");
    assert!(!short.is_plottable());

    let mut session = Session::new();
    session.load("messy.csv", Ok(dataset));
    session.select_country("US");
    let markers = Scene::derive(&session).map.unwrap().markers;
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[1].radius, 0.0);
}

#[test]
fn test_row_count_matches_non_empty_rows() {
    let mut data =
        String::from("ident,name,elevation_ft,iso_country,municipality,longitude,latitude\n");
    let countries = ["US", "PL", "BR", "US", "JP", "PL", "XX"];
    for (i, code) in countries.iter().cycle().take(70).enumerate() {
        data.push_str(&format!("ID{i},Airport {i},{i}0,{code},Town,{i}.5,1.25\n"));
        if i % 9 == 0 {
            data.push('\n');
        }
    }

    let dataset = ingest(data.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 70);
    let total: usize = dataset.groups().iter().map(|g| g.members.len()).sum();
    assert_eq!(total, 70);

    let codes: Vec<&str> = dataset.groups().iter().map(|g| g.code.as_str()).collect();
    assert_eq!(codes, vec!["US", "PL", "BR", "JP", "XX"]);

    // No record appears in two groups.
    let mut seen: Vec<usize> = dataset
        .groups()
        .iter()
        .flat_map(|g| g.members.iter().map(|id| id.0))
        .collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 70);
}

#[test]
fn test_ingest_file_reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("airports.csv");
    fs::write(
        &path,
        "ident,name,elevation_ft,iso_country,municipality,longitude,latitude\nEGLL,Heathrow,83,GB,London,-0.4614,51.4775\n",
    )
    .unwrap();

    let dataset = ingest_file(&path).unwrap();
    assert_eq!(dataset.records()[0].elevation_m, Some(25.3));

    let missing = ingest_file(dir.path().join("nope.csv"));
    assert!(matches!(missing, Err(IngestError::Io(_))));
}

#[test]
fn test_utf8_bom_header() {
    let data = "\u{feff}ident,name,elevation_ft,iso_country,municipality,longitude,latitude\nA,B,1,US,C,1,2\n";
    let dataset = ingest(data.as_bytes()).unwrap();
    assert_eq!(dataset.records()[0].ident, "A");
}
