//! Dataset analytics — descriptive statistics over the product CSV.
//!
//! A deliberately simple collaborator next to the recommendation pipeline:
//! count, main-category distribution, and describe-style price statistics,
//! tolerating a missing file or missing columns without crashing.

use serde_json::json;

use curio_core::{Error, Result};

/// Read the dataset and summarize it.
///
/// A missing file is `MissingResource`; missing columns degrade to
/// per-section error objects in the report.
pub fn summarize(path: &str) -> Result<serde_json::Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingResource(
                "Analytics data file not found.".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let records = parse_csv(&content);
    let (header, rows) = match records.split_first() {
        Some(split) => split,
        None => {
            return Ok(json!({
                "product_count": 0,
                "category_distribution": { "error": "Categories column not found" },
                "price_statistics": { "error": "Price column not found" },
            }));
        }
    };

    let categories_col = header.iter().position(|h| h == "categories");
    let price_col = header.iter().position(|h| h == "price");

    let category_distribution = match categories_col {
        Some(col) => {
            let mut counts = std::collections::BTreeMap::new();
            for row in rows {
                let main = row
                    .get(col)
                    .map(|v| v.split('>').next().unwrap_or("").trim())
                    .filter(|s| !s.is_empty())
                    .unwrap_or("Unknown");
                *counts.entry(main.to_string()).or_insert(0u64) += 1;
            }
            json!(counts)
        }
        None => json!({ "error": "Categories column not found" }),
    };

    let price_statistics = match price_col {
        Some(col) => {
            let prices: Vec<f64> = rows
                .iter()
                .filter_map(|row| row.get(col))
                .filter_map(|raw| parse_price(raw))
                .collect();
            describe(&prices)
        }
        None => json!({ "error": "Price column not found" }),
    };

    Ok(json!({
        "product_count": rows.len(),
        "category_distribution": category_distribution,
        "price_statistics": price_statistics,
    }))
}

/// Scrub currency symbols and thousands separators, then parse.
/// Unparseable values count as missing, not as zero.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    cleaned.parse().ok()
}

/// Describe-style summary: count, mean, std, min, quartiles, max.
/// All-missing data yields nulls rather than an error.
fn describe(values: &[f64]) -> serde_json::Value {
    if values.is_empty() {
        return json!({
            "count": 0,
            "mean": null,
            "std": null,
            "min": null,
            "25%": null,
            "50%": null,
            "75%": null,
            "max": null,
        });
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    // Sample standard deviation; undefined for a single observation.
    let std = if n > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        Some(var.sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    json!({
        "count": n,
        "mean": mean,
        "std": std,
        "min": sorted[0],
        "25%": percentile(&sorted, 0.25),
        "50%": percentile(&sorted, 0.50),
        "75%": percentile(&sorted, 0.75),
        "max": sorted[n - 1],
    })
}

/// Linear-interpolation percentile over pre-sorted data.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Minimal CSV reader: comma-separated, double-quoted fields with `""`
/// escapes, quoted fields may span lines. Good enough for the exported
/// product dataset; no external collaborator needs more.
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => {
                record.push(std::mem::take(&mut field));
                // keep building the current record
            }
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}
