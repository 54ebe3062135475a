//! Order catalog upload.
//!
//! An upload is read into a plain header/rows table first, whatever its
//! format, and only written to the store once every required column has
//! been found. A rejected upload never touches the current catalog.

use crate::error::SurveyError;
use crate::storage::SurveyStore;
use calamine::{Data, Reader, Xlsx};
use chrono::Timelike;
use common::model::catalog::{CatalogSummary, OrderColumn};
use common::model::order::OrderRecord;
use log::{info, warn};
use std::collections::HashSet;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Xlsx,
    Csv,
}

impl UploadFormat {
    pub fn from_filename(filename: &str) -> Result<Self, SurveyError> {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
            Ok(UploadFormat::Xlsx)
        } else if lower.ends_with(".csv") {
            Ok(UploadFormat::Csv)
        } else {
            Err(SurveyError::UnsupportedUpload(filename.to_string()))
        }
    }
}

/// Cell text of one sheet, header row split off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return SheetTable::default();
        }
        let headers = rows.remove(0);
        SheetTable { headers, rows }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCatalog {
    pub orders: Vec<OrderRecord>,
    pub skipped_blank: usize,
    pub duplicates_dropped: usize,
}

pub fn read_upload(
    bytes: &[u8],
    format: UploadFormat,
    sheet_name: &str,
) -> Result<SheetTable, SurveyError> {
    match format {
        UploadFormat::Xlsx => read_xlsx(bytes, sheet_name),
        UploadFormat::Csv => read_csv(bytes),
    }
}

fn read_xlsx(bytes: &[u8], sheet_name: &str) -> Result<SheetTable, SurveyError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| SurveyError::Spreadsheet(e.to_string()))?;

    let available = workbook.sheet_names();
    let wanted = sheet_name.trim().to_lowercase();
    let sheet = available
        .iter()
        .find(|name| name.trim().to_lowercase() == wanted)
        .cloned()
        .ok_or_else(|| SurveyError::MissingSheet {
            expected: sheet_name.to_string(),
            available: available.clone(),
        })?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| SurveyError::Spreadsheet(e.to_string()))?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(SheetTable::from_rows(rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        // Order ids typed as numbers come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) if ts.hour() == 0 && ts.minute() == 0 && ts.second() == 0 => {
                ts.format("%Y-%m-%d").to_string()
            }
            Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Picks the separator that occurs most often in the header line; ties and
/// single-column headers fall back to the earlier candidate.
fn detect_delimiter(header_line: &str) -> u8 {
    let mut best = (b',', 0);
    for d in [b',', b';', b'\t', b'|'] {
        let count = header_line.matches(d as char).count();
        if count > best.1 {
            best = (d, count);
        }
    }
    best.0
}

fn read_csv(bytes: &[u8]) -> Result<SheetTable, SurveyError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let header_end = bytes.iter().position(|&b| b == b'\n').unwrap_or(bytes.len());
    let header_line = String::from_utf8_lossy(&bytes[..header_end]);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(&header_line))
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| SurveyError::Spreadsheet(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(SheetTable::from_rows(rows))
}

fn normalize_header(cell: &str) -> String {
    let s = cell.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s);
    s.replace('\u{00A0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Maps the table onto order records.
///
/// Fails with every missing column named when any required column is
/// absent. Rows without an order id are skipped; a repeated order id keeps
/// its first row.
pub fn parse_orders(table: &SheetTable) -> Result<ParsedCatalog, SurveyError> {
    let headers: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();

    let mut indexes = [0usize; 6];
    let mut missing = Vec::new();
    for (slot, column) in OrderColumn::ALL.iter().enumerate() {
        match headers.iter().position(|h| column.matches(h)) {
            Some(idx) => indexes[slot] = idx,
            None => missing.push(column.name().to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(SurveyError::MissingColumns(missing));
    }

    let [id_idx, status_idx, client_idx, service_idx, date_idx, provider_idx] = indexes;

    let mut seen = HashSet::new();
    let mut orders = Vec::with_capacity(table.rows.len());
    let mut skipped_blank = 0;
    let mut duplicates_dropped = 0;

    for row in &table.rows {
        let order_id = cell(row, id_idx);
        if order_id.is_empty() {
            skipped_blank += 1;
            continue;
        }
        if !seen.insert(order_id.clone()) {
            duplicates_dropped += 1;
            continue;
        }
        orders.push(OrderRecord {
            order_id,
            status: cell(row, status_idx),
            client: cell(row, client_idx),
            service: cell(row, service_idx),
            date: cell(row, date_idx),
            provider: cell(row, provider_idx),
        });
    }

    Ok(ParsedCatalog {
        orders,
        skipped_blank,
        duplicates_dropped,
    })
}

/// Validates an uploaded file and replaces the whole catalog with it.
pub fn upload_catalog(
    store: &dyn SurveyStore,
    filename: &str,
    bytes: &[u8],
    sheet_name: &str,
) -> Result<CatalogSummary, SurveyError> {
    let format = UploadFormat::from_filename(filename)?;
    let table = read_upload(bytes, format, sheet_name)?;
    let parsed = parse_orders(&table)?;

    if parsed.duplicates_dropped > 0 {
        warn!(
            "Upload {} repeats {} order id(s); the first row of each was kept",
            filename, parsed.duplicates_dropped
        );
    }
    store.save_orders(&parsed.orders)?;
    info!(
        "Order catalog replaced from {}: {} orders",
        filename,
        parsed.orders.len()
    );

    Ok(CatalogSummary {
        orders: parsed.orders.len(),
        skipped_blank: parsed.skipped_blank,
        duplicates_dropped: parsed.duplicates_dropped,
    })
}
