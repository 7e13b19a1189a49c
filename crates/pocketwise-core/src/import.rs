//! Expense records file parsers (JSON and CSV)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Category, NewExpense};

/// Supported records file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// Array of expense objects
    Json,
    /// `date,category,amount[,notes]` with a header row
    Csv,
}

impl RecordFormat {
    /// Detect format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

impl std::str::FromStr for RecordFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown records format: {}", s)),
        }
    }
}

/// Load expenses from a file, detecting the format unless given
pub fn load_records(path: &Path, format: Option<RecordFormat>) -> Result<Vec<NewExpense>> {
    let format = format
        .or_else(|| RecordFormat::from_path(path))
        .ok_or_else(|| {
            Error::Import(format!(
                "Cannot detect records format for {} (use .json or .csv)",
                path.display()
            ))
        })?;

    let reader = BufReader::new(File::open(path)?);
    let expenses = match format {
        RecordFormat::Json => parse_json(reader)?,
        RecordFormat::Csv => parse_csv(reader)?,
    };

    debug!(path = %path.display(), count = expenses.len(), "Loaded expense records");
    Ok(expenses)
}

/// Parse a JSON array of expenses
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<NewExpense>> {
    let expenses: Vec<NewExpense> = serde_json::from_reader(reader)?;
    for (i, expense) in expenses.iter().enumerate() {
        expense
            .validate()
            .map_err(|e| Error::Import(format!("entry {}: {}", i + 1, e)))?;
    }
    Ok(expenses)
}

/// Parse CSV expenses
/// Format: date,category,amount,notes (notes optional)
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewExpense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = CsvColumns::from_headers(&headers)?;
    let mut expenses = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2;

        let date_str = field(&record, columns.date)
            .ok_or_else(|| Error::Import(format!("line {}: missing date", line)))?;
        let occurred_at = parse_date(date_str)?;

        let category: Category = field(&record, columns.category)
            .ok_or_else(|| Error::Import(format!("line {}: missing category", line)))?
            .parse()?;

        let amount_str = field(&record, columns.amount)
            .ok_or_else(|| Error::Import(format!("line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str)?;

        let notes = columns
            .notes
            .and_then(|idx| field(&record, idx))
            .map(|s| s.to_string());

        let expense = NewExpense {
            amount,
            category,
            occurred_at,
            notes,
        };
        expense
            .validate()
            .map_err(|e| Error::Import(format!("line {}: {}", line, e)))?;
        expenses.push(expense);
    }

    Ok(expenses)
}

/// Column positions resolved from the header row
struct CsvColumns {
    date: usize,
    category: usize,
    amount: usize,
    notes: Option<usize>,
}

impl CsvColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing CSV column: {}", name)))
        };

        Ok(Self {
            date: required("date")?,
            category: required("category")?,
            amount: required("amount")?,
            notes: find("notes"),
        })
    }
}

/// Non-empty field at `idx`
fn field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|s| !s.is_empty())
}

/// Parse a date or date-time. Date-only values land at local midnight.
fn parse_date(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",   // 2026-01-15T14:30:00
        "%Y-%m-%dT%H:%M:%S%.f", // 2026-01-15T14:30:00.123
        "%Y-%m-%d %H:%M:%S",   // 2026-01-15 14:30:00
        "%Y-%m-%d %H:%M",      // 2026-01-15 14:30
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    let date_formats = [
        "%Y-%m-%d", // 2026-01-15
        "%m/%d/%Y", // 01/15/2026
        "%d/%m/%Y", // 15/01/2026 (European)
    ];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', '₹', '€', '£', ',', ' '], "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
