//! Spreadsheet ingestion: week-sheet discovery, cross-sheet unification,
//! and normalization into the typed [`CardTable`].
//!
//! Loading is all-or-nothing. An unreadable workbook or a workbook with no
//! week-partition sheets is a hard error; a missing column or cell is not,
//! and defaults apply per concept.

use std::io::Cursor;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use crate::cards::{Card, CardTable, Channel, Decision, Priority, UNKNOWN_DEVELOPER};
use crate::schema::{ResolvedSchema, WEEK_SHEET_MARKER, is_week_sheet};

/// One week-partition sheet as read from the workbook: the header row plus
/// raw data rows.
#[derive(Debug)]
pub struct WeekSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

/// Parses workbook bytes into the unified card table.
pub fn load_table(bytes: Vec<u8>) -> Result<CardTable> {
    let sheets = read_week_sheets(bytes)?;
    build_table(sheets)
}

/// Opens the workbook and extracts every sheet matching the week marker,
/// in workbook order.
pub fn read_week_sheets(bytes: Vec<u8>) -> Result<Vec<WeekSheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .context("failed to open spreadsheet")?;

    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::new();
    for name in names {
        if !is_week_sheet(&name) {
            continue;
        }

        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("failed to read sheet {name:?}"))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(header_text).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<Data>> = rows.map(|row| row.to_vec()).collect();

        info!(sheet = %name, rows = rows.len(), "Week sheet loaded");
        sheets.push(WeekSheet { name, headers, rows });
    }

    Ok(sheets)
}

/// Unifies week sheets into one table and normalizes it into typed cards.
///
/// # Errors
///
/// Fails when `sheets` is empty: a workbook without week partitions never
/// produces an empty summary.
pub fn build_table(sheets: Vec<WeekSheet>) -> Result<CardTable> {
    if sheets.is_empty() {
        bail!("no week partition sheets found; sheet names must contain {WEEK_SHEET_MARKER:?}");
    }

    let unified = unify(sheets);
    let table = normalize(unified);
    info!(
        cards = table.cards.len(),
        weeks = table.weeks.len(),
        "Card table built"
    );
    Ok(table)
}

/// All week sheets concatenated into one table. Columns are the union of
/// sheet headers by exact name; cells absent from a sheet are empty.
struct UnifiedTable {
    columns: Vec<String>,
    weeks: Vec<String>,
    /// `(week, cells)` pairs, cells aligned to `columns`.
    rows: Vec<(String, Vec<Data>)>,
}

fn unify(sheets: Vec<WeekSheet>) -> UnifiedTable {
    let mut columns: Vec<String> = Vec::new();
    for sheet in &sheets {
        for header in &sheet.headers {
            if !columns.contains(header) {
                columns.push(header.clone());
            }
        }
    }

    let mut weeks = Vec::with_capacity(sheets.len());
    let mut rows = Vec::new();
    for sheet in sheets {
        // Position of each unified column within this sheet, if present.
        let mapping: Vec<Option<usize>> = columns
            .iter()
            .map(|c| sheet.headers.iter().position(|h| h == c))
            .collect();

        for row in &sheet.rows {
            let cells = mapping
                .iter()
                .map(|slot| match slot {
                    Some(i) => row.get(*i).cloned().unwrap_or(Data::Empty),
                    None => Data::Empty,
                })
                .collect();
            rows.push((sheet.name.clone(), cells));
        }
        weeks.push(sheet.name);
    }

    UnifiedTable { columns, weeks, rows }
}

fn normalize(table: UnifiedTable) -> CardTable {
    let schema = ResolvedSchema::resolve(&table.columns);
    let has_description = schema.description.is_some();

    fn text(cells: &[Data], column: Option<usize>) -> Option<String> {
        column.and_then(|i| cell_text(&cells[i]))
    }

    let mut cards = Vec::with_capacity(table.rows.len());
    for (week, cells) in table.rows {
        let developer = schema
            .developer
            .iter()
            .find_map(|&i| cell_text(&cells[i]))
            .unwrap_or_else(|| UNKNOWN_DEVELOPER.to_string());

        cards.push(Card {
            week,
            reviewer: text(&cells, schema.reviewer),
            channel: text(&cells, schema.channel).and_then(|v| Channel::parse(&v)),
            developer,
            site: text(&cells, schema.site),
            platform: text(&cells, schema.platform),
            priority: text(&cells, schema.priority).and_then(|v| Priority::parse(&v)),
            description: text(&cells, schema.description),
            decision: text(&cells, schema.decision)
                .map(|v| Decision::parse(&v))
                .unwrap_or_default(),
            rejection_count: schema
                .rejection_count
                .map(|i| cell_count(&cells[i]))
                .unwrap_or(0),
            validation_date: schema.validation_date.and_then(|i| cell_date(&cells[i])),
            resolution_date: schema.resolution_date.and_then(|i| cell_date(&cells[i])),
        });
    }

    CardTable {
        weeks: table.weeks,
        cards,
        has_description,
    }
}

fn header_text(cell: &Data) -> String {
    cell_text(cell).unwrap_or_default()
}

/// Trimmed textual value of a cell; empty and error cells are missing.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) | Data::DateTimeIso(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Empty | Data::Error(_) | Data::DurationIso(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Numeric coercion for the rejection-count column. Non-numeric, missing,
/// and negative input all normalize to 0.
fn cell_count(cell: &Data) -> u32 {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => f64::from(*b),
        Data::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };

    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

/// Best-effort date coercion; anything unparseable is "no date", never an
/// error.
fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

/// Excel serial day numbers count from 1899-12-30. The 1900 date system
/// tops out at year 9999 (serial 2958465).
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 || serial > 2_958_465.0 {
        warn!(serial, "Unusable date serial, treating as missing");
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(serial as i64))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y-%m-%dT%H:%M:%S",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
