use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::columns::{REQUIRED_COLUMNS, missing_columns};
use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("catalogue_qc_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn catalogue_csv(n_rows: usize) -> String {
    let mut out = REQUIRED_COLUMNS.join(",");
    out.push('\n');
    for i in 0..n_rows {
        let mut cells = vec![format!("Product {i}")];
        cells.extend((1..REQUIRED_COLUMNS.len()).map(|_| "x".to_string()));
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

#[test]
fn test_read_catalogue_full_header() {
    let table = read_catalogue(catalogue_csv(3).as_bytes()).unwrap();
    assert_eq!(table.columns.len(), 21);
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.cell(2, "Product Name"), Some("Product 2"));
    assert!(missing_columns(&table).is_empty());
}

#[test]
fn test_read_catalogue_strips_bom_and_trims_headers() {
    let csv = "\u{feff} Product Name ,Price\nLipstick,12\n";
    let table = read_catalogue(csv.as_bytes()).unwrap();
    assert_eq!(table.columns, vec!["Product Name", "Price"]);
}

#[test]
fn test_read_catalogue_quoted_fields() {
    let csv = "Product Name,Description\n\"Balm, tinted\",\"says \"\"hi\"\"\"\n";
    let table = read_catalogue(csv.as_bytes()).unwrap();
    assert_eq!(table.cell(0, "Product Name"), Some("Balm, tinted"));
    assert_eq!(table.cell(0, "Description"), Some("says \"hi\""));
}

#[test]
fn test_read_catalogue_short_rows_are_padded() {
    let csv = "a,b,c\n1\n";
    let table = read_catalogue(csv.as_bytes()).unwrap();
    assert_eq!(table.rows[0], vec!["1", "", ""]);
}

#[test]
fn test_read_catalogue_long_row_fails() {
    let err = read_catalogue(b"a,b\n1,2,3\n4,5\n").unwrap_err();
    assert!(matches!(err, InputError::Csv(_)));
    assert!(err.to_string().contains("Expected 2 fields in line 2, saw 3"));
}

#[test]
fn test_read_catalogue_empty_input_fails() {
    assert!(matches!(read_catalogue(b""), Err(InputError::Empty)));
}

#[test]
fn test_read_catalogue_invalid_utf8_fails() {
    let bytes = b"name\n\xff\xfe\n";
    assert!(matches!(read_catalogue(bytes), Err(InputError::Csv(_))));
}

#[test]
fn test_missing_columns_is_set_difference() {
    let csv = "Product Name,Price,Extra Column,Disclaimer\nA,1,z,none\n";
    let table = read_catalogue(csv.as_bytes()).unwrap();
    let missing = missing_columns(&table);

    let present = ["Product Name", "Price", "Disclaimer"];
    let expected: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(c))
        .map(|c| c.to_string())
        .collect();
    assert_eq!(missing, expected);
    assert_eq!(missing.len(), 18);
}

#[test]
fn test_missing_columns_on_empty_table_lists_all() {
    assert_eq!(missing_columns(&Table::empty()).len(), REQUIRED_COLUMNS.len());
}

#[test]
fn test_read_maybe_gz_plain_and_gz() {
    let dir = make_temp_dir();
    let plain = dir.join("catalogue.csv");
    let gz = dir.join("catalogue.csv.gz");
    let contents = catalogue_csv(2);

    fs::write(&plain, &contents).unwrap();
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    fs::write(&gz, enc.finish().unwrap()).unwrap();

    let a = read_maybe_gz(&plain).unwrap();
    let b = read_maybe_gz(&gz).unwrap();
    assert_eq!(a, b);
    assert_eq!(read_catalogue(&a).unwrap().n_rows(), 2);
}

#[test]
fn test_read_maybe_gz_missing_path() {
    let dir = make_temp_dir();
    let err = read_maybe_gz(&dir.join("nope.csv")).unwrap_err();
    assert!(matches!(err, InputError::Io(_)));
}
