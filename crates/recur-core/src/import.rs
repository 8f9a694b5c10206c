//! Transaction loading from CSV and JSON files
//!
//! Rows with an unparsable date or amount are skipped and reported instead of
//! aborting the import, so one bad line never hides the rest of a statement.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde_json::value::RawValue;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// CSV column layouts understood by the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// Header-named columns: date, description, amount, optional category_id
    Generic,
    /// Transaction Date,Post Date,Description,Category,Type,Amount,Memo
    Chase,
    /// Date,Description,Amount,Running Bal.
    Bofa,
    /// Date,Description,Amount (simple) or Date,Description,Card Member,Account #,Amount,...
    /// Expenses are positive in Amex exports.
    Amex,
    /// Transaction Date,Posted Date,Card No.,Description,Category,Debit,Credit
    CapitalOne,
}

impl CsvLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Chase => "chase",
            Self::Bofa => "bofa",
            Self::Amex => "amex",
            Self::CapitalOne => "capitalone",
        }
    }

    pub fn all() -> &'static [CsvLayout] {
        &[
            Self::Generic,
            Self::Chase,
            Self::Bofa,
            Self::Amex,
            Self::CapitalOne,
        ]
    }

    /// Detect the layout from a CSV header line
    pub fn detect(header: &str) -> Option<Self> {
        let header = header.trim().trim_start_matches('\u{feff}');

        // "Posted Date" (not "Post Date") distinguishes Capital One from Chase
        if header.starts_with("Transaction Date,Posted Date,Card No.") {
            return Some(Self::CapitalOne);
        }
        if header.starts_with("Transaction Date,Post Date,Description,Category,Type,Amount") {
            return Some(Self::Chase);
        }
        if header.starts_with("Date,Description,Card Member,Account #,Amount") {
            return Some(Self::Amex);
        }
        if header.starts_with("Date,Description,Amount") {
            if header.contains("Running") || header.contains("Balance") {
                return Some(Self::Bofa);
            }
            if header.split(',').count() == 3 {
                return Some(Self::Amex);
            }
            return Some(Self::Bofa);
        }

        let names: Vec<String> = header
            .split(',')
            .map(|h| normalize_header(h.trim_matches('"')))
            .collect();
        if names.iter().any(|n| n == "date") && names.iter().any(|n| n == "amount") {
            return Some(Self::Generic);
        }

        None
    }

    /// Resolve column positions against the parsed header row
    fn columns(&self, headers: &StringRecord) -> Result<Columns> {
        let columns = match self {
            Self::Generic => {
                let find = |wanted: &[&str]| {
                    headers
                        .iter()
                        .position(|h| wanted.contains(&normalize_header(h).as_str()))
                };
                let date = find(&["date"]).ok_or_else(|| {
                    Error::UnsupportedLayout("generic CSV needs a 'date' column".into())
                })?;
                let amount = find(&["amount"]).ok_or_else(|| {
                    Error::UnsupportedLayout("generic CSV needs an 'amount' column".into())
                })?;
                Columns {
                    date,
                    description: find(&["description", "memo", "name"]),
                    amount: AmountColumns::Signed {
                        column: amount,
                        invert: false,
                    },
                    category: find(&["categoryid", "category_id"]),
                }
            }
            Self::Chase => Columns {
                date: 0,
                description: Some(2),
                amount: AmountColumns::Signed {
                    column: 5,
                    invert: false,
                },
                category: None,
            },
            Self::Bofa => Columns {
                date: 0,
                description: Some(1),
                amount: AmountColumns::Signed {
                    column: 2,
                    invert: false,
                },
                category: None,
            },
            Self::Amex => {
                let extended = headers.len() > 3 && headers.get(2) == Some("Card Member");
                Columns {
                    date: 0,
                    description: Some(1),
                    amount: AmountColumns::Signed {
                        column: if extended { 4 } else { 2 },
                        invert: true,
                    },
                    category: None,
                }
            }
            Self::CapitalOne => Columns {
                date: 0,
                description: Some(3),
                amount: AmountColumns::DebitCredit {
                    debit: 5,
                    credit: 6,
                },
                category: None,
            },
        };
        Ok(columns)
    }
}

impl fmt::Display for CsvLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CsvLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "generic" => Ok(Self::Generic),
            "chase" => Ok(Self::Chase),
            "bofa" | "bankofamerica" => Ok(Self::Bofa),
            "amex" | "americanexpress" => Ok(Self::Amex),
            "capitalone" => Ok(Self::CapitalOne),
            _ => Err(Error::UnsupportedLayout(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum AmountColumns {
    Signed { column: usize, invert: bool },
    DebitCredit { debit: usize, credit: usize },
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    description: Option<usize>,
    amount: AmountColumns,
    category: Option<usize>,
}

/// A row that could not be turned into a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line (CSV) or element index (JSON)
    pub line: u64,
    pub reason: String,
}

/// Outcome of loading one file
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    fn skip(&mut self, line: u64, reason: String) {
        warn!("Skipping row {}: {}", line, reason);
        self.skipped.push(SkippedRow { line, reason });
    }
}

/// Load transactions from CSV using the given layout
pub fn load_csv<R: Read>(reader: R, layout: CsvLayout) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = layout.columns(&headers)?;
    let mut report = ImportReport::default();

    for (index, result) in rdr.records().enumerate() {
        // Header is line 1
        let fallback_line = index as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                report.skip(line, e.to_string());
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);

        match parse_record(&record, &columns) {
            Ok(tx) => report.transactions.push(tx),
            Err(reason) => report.skip(line, reason),
        }
    }

    debug!(
        "Parsed {} {} transactions ({} skipped)",
        report.transactions.len(),
        layout,
        report.skipped.len()
    );
    Ok(report)
}

fn parse_record(record: &StringRecord, columns: &Columns) -> std::result::Result<Transaction, String> {
    let date_str = field(record, columns.date).ok_or("missing date")?;
    let date = parse_date(date_str)?;

    let amount = match columns.amount {
        AmountColumns::Signed { column, invert } => {
            let value = parse_amount(field(record, column).ok_or("missing amount")?)?;
            if invert {
                -value
            } else {
                value
            }
        }
        AmountColumns::DebitCredit { debit, credit } => {
            let debit = field(record, debit).map(parse_amount).transpose()?;
            let credit = field(record, credit).map(parse_amount).transpose()?;
            match (debit, credit) {
                (None, None) => return Err("missing debit and credit".to_string()),
                (d, c) => c.unwrap_or(0.0) - d.unwrap_or(0.0).abs(),
            }
        }
    };

    let description = columns
        .description
        .and_then(|c| record.get(c))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let category_id = columns
        .category
        .and_then(|c| field(record, c))
        .and_then(|s| s.parse::<i64>().ok());

    Ok(Transaction {
        description,
        amount,
        date,
        category_id,
    })
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_matches('"')
        .to_lowercase()
        .replace(' ', "")
}

/// Non-empty trimmed field
fn field(record: &StringRecord, column: usize) -> Option<&str> {
    record.get(column).map(str::trim).filter(|s| !s.is_empty())
}

/// Load transactions from a JSON array of transaction objects
///
/// Accepts `amount` as a number or a string and `categoryId` as a number or
/// numeric string. Elements that cannot be read (including numbers out of
/// `f64` range) are skipped; only a broken array fails the load.
pub fn load_json<R: Read>(reader: R) -> Result<ImportReport> {
    let elements: Vec<Box<RawValue>> = serde_json::from_reader(reader)?;
    let mut report = ImportReport::default();

    for (index, raw) in elements.iter().enumerate() {
        let parsed = serde_json::from_str::<Value>(raw.get())
            .map_err(|e| format!("unreadable element: {}", e))
            .and_then(|value| transaction_from_value(&value));
        match parsed {
            Ok(tx) => report.transactions.push(tx),
            Err(reason) => report.skip(index as u64 + 1, reason),
        }
    }

    debug!(
        "Parsed {} JSON transactions ({} skipped)",
        report.transactions.len(),
        report.skipped.len()
    );
    Ok(report)
}

fn transaction_from_value(value: &Value) -> std::result::Result<Transaction, String> {
    let obj = value.as_object().ok_or("not an object")?;

    let date = match obj.get("date") {
        Some(Value::String(s)) => parse_date(s)?,
        Some(other) => return Err(format!("unparsable date: {}", other)),
        None => return Err("missing date".to_string()),
    };

    let amount = match obj.get("amount") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("unparsable amount: {}", n))?,
        Some(Value::String(s)) => parse_amount(s)?,
        Some(other) => return Err(format!("unparsable amount: {}", other)),
        None => return Err("missing amount".to_string()),
    };

    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let category_id = match obj.get("categoryId").or_else(|| obj.get("category_id")) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };

    Ok(Transaction {
        description,
        amount,
        date,
        category_id,
    })
}

/// Load a file, choosing JSON or CSV by extension
///
/// CSV layout is detected from the header when not given.
pub fn load_path(path: &Path, layout: Option<CsvLayout>) -> Result<ImportReport> {
    // Bytes, not a String: a row with invalid UTF-8 is skipped by the CSV
    // reader instead of failing the whole file
    let content = fs::read(path)?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        return load_json(content.as_slice());
    }

    let layout = match layout {
        Some(layout) => layout,
        None => {
            let header_end = content
                .iter()
                .position(|&b| b == b'\n')
                .unwrap_or(content.len());
            let header = String::from_utf8_lossy(&content[..header_end]);
            CsvLayout::detect(&header).ok_or_else(|| {
                Error::Import(format!(
                    "Could not detect CSV layout of {}; pass one of: {}",
                    path.display(),
                    CsvLayout::all()
                        .iter()
                        .map(|l| l.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?
        }
    };
    debug!("Loading {} as {} CSV", path.display(), layout);
    load_csv(content.as_slice(), layout)
}

/// Hash identifying a transaction across files
pub fn transaction_hash(tx: &Transaction) -> String {
    let mut hasher = Sha256::new();
    hasher.update(tx.date.to_string().as_bytes());
    hasher.update(tx.description.as_bytes());
    hasher.update(tx.amount.to_be_bytes());
    if let Some(category_id) = tx.category_id {
        hasher.update(category_id.to_be_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Transactions merged from several files
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    pub transactions: Vec<Transaction>,
    pub duplicates: usize,
}

/// Merge transactions from several files, dropping overlap between files
///
/// Identical rows inside one file are kept (two identical coffees on the same
/// day are real); a row is only dropped when an earlier file already supplied
/// as many copies of it.
pub fn merge_files<I>(files: I) -> MergeResult
where
    I: IntoIterator<Item = Vec<Transaction>>,
{
    let mut kept: HashMap<String, usize> = HashMap::new();
    let mut result = MergeResult::default();

    for file in files {
        let mut seen_in_file: HashMap<String, usize> = HashMap::new();
        for tx in file {
            let hash = transaction_hash(&tx);
            let seen = seen_in_file.entry(hash.clone()).or_insert(0);
            *seen += 1;

            let kept_count = kept.entry(hash).or_insert(0);
            if *seen > *kept_count {
                *kept_count += 1;
                result.transactions.push(tx);
            } else {
                result.duplicates += 1;
            }
        }
    }

    if result.duplicates > 0 {
        debug!(
            "Dropped {} transactions already present in an earlier file",
            result.duplicates
        );
    }
    result
}

/// Parse a date in any of the supported formats
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(format!("unparsable date: {}", s))
}

/// Parse an amount string, handling currency symbols, commas, and (negatives)
pub fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("unparsable amount: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("01/15/2024").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("01/15/24").unwrap(), date(2024, 1, 15));
        assert_eq!(parse_date("01-15-2024").unwrap(), date(2024, 1, 15));
        assert_eq!(
            parse_date("2024-01-15T08:30:00Z").unwrap(),
            date(2024, 1, 15)
        );
        assert_eq!(
            parse_date("2024-01-15T08:30:00.000").unwrap(),
            date(2024, 1, 15)
        );
        assert!(parse_date("invalid").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-39.90").unwrap(), -39.90);
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("(50.00)").unwrap(), -50.0);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_detect_layout() {
        assert_eq!(
            CsvLayout::detect("Transaction Date,Post Date,Description,Category,Type,Amount,Memo"),
            Some(CsvLayout::Chase)
        );
        assert_eq!(
            CsvLayout::detect("Transaction Date,Posted Date,Card No.,Description,Category,Debit,Credit"),
            Some(CsvLayout::CapitalOne)
        );
        assert_eq!(
            CsvLayout::detect("Date,Description,Amount,Running Bal."),
            Some(CsvLayout::Bofa)
        );
        assert_eq!(
            CsvLayout::detect("Date,Description,Amount"),
            Some(CsvLayout::Amex)
        );
        assert_eq!(
            CsvLayout::detect("date,description,amount,categoryId"),
            Some(CsvLayout::Generic)
        );
        assert_eq!(CsvLayout::detect("foo,bar"), None);
    }

    #[test]
    fn test_layout_from_str() {
        for layout in CsvLayout::all() {
            assert_eq!(layout.as_str().parse::<CsvLayout>().unwrap(), *layout);
        }
        assert_eq!("Capital One".parse::<CsvLayout>().unwrap(), CsvLayout::CapitalOne);
        assert!(matches!(
            "mint".parse::<CsvLayout>(),
            Err(Error::UnsupportedLayout(_))
        ));
    }

    #[test]
    fn test_load_generic_skips_bad_rows() {
        let csv = "\
date,description,amount,category_id
2025-01-05,Netflix,-39.90,4
not-a-date,Netflix,-39.90,4
2025-02-05,Netflix,abc,4
2025-03-05,Netflix,-39.90,
2025-03-06,,-1.00,x
";
        let report = load_csv(csv.as_bytes(), CsvLayout::Generic).unwrap();
        assert_eq!(report.transactions.len(), 3);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 3);
        assert!(report.skipped[0].reason.contains("date"));
        assert_eq!(report.skipped[1].line, 4);
        assert!(report.skipped[1].reason.contains("amount"));

        assert_eq!(report.transactions[0].category_id, Some(4));
        assert_eq!(report.transactions[1].category_id, None);
        assert_eq!(report.transactions[2].description, "");
        assert_eq!(report.transactions[2].category_id, None);
    }

    #[test]
    fn test_generic_requires_columns() {
        let csv = "when,description,amount\n2025-01-01,X,1\n";
        assert!(matches!(
            load_csv(csv.as_bytes(), CsvLayout::Generic),
            Err(Error::UnsupportedLayout(_))
        ));
    }

    #[test]
    fn test_load_chase() {
        let csv = "\
Transaction Date,Post Date,Description,Category,Type,Amount,Memo
07/15/2023,07/16/2023,NETFLIX.COM,Entertainment,Sale,-15.49,
08/15/2023,08/16/2023,NETFLIX.COM,Entertainment,Sale,-15.49,
";
        let report = load_csv(csv.as_bytes(), CsvLayout::Chase).unwrap();
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].description, "NETFLIX.COM");
        assert_eq!(report.transactions[0].amount, -15.49);
        assert_eq!(report.transactions[0].date, date(2023, 7, 15));
    }

    #[test]
    fn test_load_amex_inverts_sign() {
        let simple = "Date,Description,Amount\n01/05/2025,SPOTIFY,10.99\n01/06/2025,PAYMENT,-500.00\n";
        let report = load_csv(simple.as_bytes(), CsvLayout::Amex).unwrap();
        assert_eq!(report.transactions[0].amount, -10.99);
        assert_eq!(report.transactions[1].amount, 500.0);

        let extended = "Date,Description,Card Member,Account #,Amount\n01/05/2025,HULU,J DOE,-1234,17.99\n";
        let report = load_csv(extended.as_bytes(), CsvLayout::Amex).unwrap();
        assert_eq!(report.transactions[0].amount, -17.99);
    }

    #[test]
    fn test_load_capitalone_debit_credit() {
        let csv = "\
Transaction Date,Posted Date,Card No.,Description,Category,Debit,Credit
2025-01-05,2025-01-06,1234,DISNEY PLUS,Entertainment,13.99,
2025-01-07,2025-01-08,1234,REFUND,Other,,5.00
2025-01-08,2025-01-09,1234,EMPTY,Other,,
";
        let report = load_csv(csv.as_bytes(), CsvLayout::CapitalOne).unwrap();
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.transactions[0].amount, -13.99);
        assert_eq!(report.transactions[1].amount, 5.0);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_load_json() {
        let json = r#"[
            {"description": "Gym", "amount": -100, "date": "2025-01-01", "categoryId": 3},
            {"description": "Gym", "amount": "-100.00", "date": "2025-01-20T00:00:00Z"},
            {"description": "Bad", "amount": "oops", "date": "2025-01-20"},
            {"description": "Bad", "amount": -1, "date": "Invalid Date"},
            {"amount": -5, "date": "2025-01-03", "categoryId": "9"},
            42
        ]"#;
        let report = load_json(json.as_bytes()).unwrap();
        assert_eq!(report.transactions.len(), 3);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.skipped[0].line, 3);

        assert_eq!(report.transactions[0].category_id, Some(3));
        assert_eq!(report.transactions[1].amount, -100.0);
        assert_eq!(report.transactions[1].date, date(2025, 1, 20));
        assert_eq!(report.transactions[2].description, "");
        assert_eq!(report.transactions[2].category_id, Some(9));
    }

    #[test]
    fn test_load_json_not_array() {
        assert!(matches!(
            load_json(r#"{"description": "x"}"#.as_bytes()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_load_json_skips_out_of_range_number() {
        let json = r#"[
            {"description": "Netflix", "amount": -15.49, "date": "2025-01-15"},
            {"description": "Netflix", "amount": -15.49, "date": "2025-02-15"},
            {"description": "Netflix", "amount": -15.49, "date": "2025-03-15"},
            {"description": "Bad", "amount": 1e400, "date": "2025-03-16"}
        ]"#;
        let report = load_json(json.as_bytes()).unwrap();
        assert_eq!(report.transactions.len(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 4);
    }

    #[test]
    fn test_load_path_skips_invalid_utf8_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");

        let mut content = b"date,description,amount\n\
2025-01-05,Netflix,-15.49\n\
2025-02-05,Netflix,-15.49\n\
2025-03-05,Netflix,-15.49\n"
            .to_vec();
        content.extend_from_slice(b"2025-03-06,Caf\xe9,-4.00\n");
        fs::write(&path, &content).unwrap();

        let report = load_path(&path, None).unwrap();
        assert_eq!(report.transactions.len(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 5);
    }

    #[test]
    fn test_merge_drops_overlap_between_files() {
        let netflix = |d| Transaction::new("Netflix", -15.49, d);
        let coffee = Transaction::new("Coffee", -4.0, date(2025, 1, 10));

        let january = vec![
            netflix(date(2025, 1, 15)),
            coffee.clone(),
            coffee.clone(),
        ];
        let overlap = vec![
            netflix(date(2025, 1, 15)),
            coffee.clone(),
            netflix(date(2025, 2, 15)),
        ];

        let merged = merge_files(vec![january, overlap]);
        assert_eq!(merged.duplicates, 2);
        assert_eq!(merged.transactions.len(), 4);
        assert_eq!(
            merged
                .transactions
                .iter()
                .filter(|t| t.description == "Coffee")
                .count(),
            2
        );
    }

    #[test]
    fn test_transaction_hash_stable() {
        let a = Transaction::new("Netflix", -15.49, date(2025, 1, 15));
        let b = a.clone().with_category(2);
        assert_eq!(transaction_hash(&a), transaction_hash(&a.clone()));
        assert_ne!(transaction_hash(&a), transaction_hash(&b));
        assert_eq!(transaction_hash(&a).len(), 64);
    }

    #[test]
    fn test_load_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("tx.json");
        fs::write(&json_path, r#"[{"description":"A","amount":-1,"date":"2025-01-01"}]"#).unwrap();
        assert_eq!(load_path(&json_path, None).unwrap().transactions.len(), 1);

        let csv_path = dir.path().join("tx.csv");
        fs::write(&csv_path, "Date,Description,Amount,Running Bal.\n01/02/2025,A,-1.00,99\n").unwrap();
        assert_eq!(load_path(&csv_path, None).unwrap().transactions.len(), 1);

        let unknown = dir.path().join("odd.csv");
        fs::write(&unknown, "a,b,c\n1,2,3\n").unwrap();
        assert!(matches!(load_path(&unknown, None), Err(Error::Import(_))));
        assert_eq!(
            load_path(&unknown, Some(CsvLayout::Bofa))
                .unwrap()
                .skipped
                .len(),
            1
        );
    }
}
