use crate::core::{ColumnNames, ColumnSelection, FlowRecord, FlowSource, FlowTable};
use crate::domain::model::Amount;
use crate::utils::error::{Result, SankeyError};
use std::io::Read;
use std::path::PathBuf;

const SOURCE_ALIASES: &[&str] = &["source", "from", "src"];
const TARGET_ALIASES: &[&str] = &["target", "to", "dest", "destination"];
const VALUE_ALIASES: &[&str] = &["value", "weight", "amount", "count", "flow"];

/// Reads flow rows from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
    columns: ColumnSelection,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>, columns: ColumnSelection) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }
}

impl FlowSource for CsvLoader {
    fn load(&self) -> Result<FlowTable> {
        tracing::debug!("Reading CSV file: {}", self.path.display());
        let data = std::fs::read(&self.path).map_err(|e| SankeyError::file(&self.path, e))?;

        let mut table = parse_flows(data.as_slice(), &self.columns)?;
        table.path = Some(self.path.clone());
        Ok(table)
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    source: usize,
    target: usize,
    value: usize,
}

/// Parses CSV text into records, in file order. Any bad row aborts the whole parse.
pub fn parse_flows<R: Read>(reader: R, selection: &ColumnSelection) -> Result<FlowTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let indices = resolve_columns(&headers, selection)?;
    tracing::debug!(
        "Using columns source={} target={} value={}",
        indices.source,
        indices.target,
        indices.value
    );

    let header_name = |idx: usize| headers.get(idx).unwrap_or_default().to_string();
    let columns = ColumnNames {
        source: header_name(indices.source),
        target: header_name(indices.target),
        value: header_name(indices.value),
    };

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        records.push(parse_row(&row, indices, &columns, line)?);
    }

    tracing::debug!("Parsed {} rows", records.len());
    Ok(FlowTable {
        path: None,
        columns,
        records,
    })
}

/// Explicit names win, then header aliases; any role still open takes the
/// leftmost column nobody has claimed, in source, target, value order.
fn resolve_columns(headers: &csv::StringRecord, selection: &ColumnSelection) -> Result<ColumnIndices> {
    let requested = [&selection.source, &selection.target, &selection.value];
    let aliases = [SOURCE_ALIASES, TARGET_ALIASES, VALUE_ALIASES];
    let mut resolved: [Option<usize>; 3] = [None; 3];

    for (slot, name) in resolved.iter_mut().zip(requested) {
        if let Some(name) = name {
            let idx = headers
                .iter()
                .position(|h| h == name.as_str())
                .ok_or_else(|| SankeyError::parse(1, format!("header has no column named '{}'", name)))?;
            *slot = Some(idx);
        }
    }

    let explicit: Vec<usize> = resolved.iter().flatten().copied().collect();
    for (i, a) in explicit.iter().enumerate() {
        if explicit[i + 1..].contains(a) {
            return Err(SankeyError::parse(
                1,
                "source, target and value must be three different columns",
            ));
        }
    }

    for role in 0..resolved.len() {
        if resolved[role].is_some() {
            continue;
        }
        let found = (0..headers.len()).find(|&idx| {
            !resolved.contains(&Some(idx)) && aliases[role].contains(&headers[idx].to_lowercase().as_str())
        });
        resolved[role] = found;
    }

    for role in 0..resolved.len() {
        if resolved[role].is_none() {
            let free = (0..).find(|&idx| !resolved.contains(&Some(idx)));
            resolved[role] = free;
        }
    }

    match resolved {
        [Some(source), Some(target), Some(value)] => Ok(ColumnIndices {
            source,
            target,
            value,
        }),
        _ => Err(SankeyError::parse(1, "could not resolve source, target and value columns")),
    }
}

fn cell<'a>(row: &'a csv::StringRecord, idx: usize, name: &str, line: u64) -> Result<&'a str> {
    row.get(idx).ok_or_else(|| {
        SankeyError::parse(
            line,
            format!("row has {} columns, missing '{}' column", row.len(), name),
        )
    })
}

fn parse_row(
    row: &csv::StringRecord,
    indices: ColumnIndices,
    columns: &ColumnNames,
    line: u64,
) -> Result<FlowRecord> {
    let source = cell(row, indices.source, &columns.source, line)?;
    let target = cell(row, indices.target, &columns.target, line)?;
    let raw_value = cell(row, indices.value, &columns.value, line)?;

    if source.is_empty() {
        return Err(SankeyError::parse(line, "source label is empty"));
    }
    if target.is_empty() {
        return Err(SankeyError::parse(line, "target label is empty"));
    }
    for label in [source, target] {
        if label.contains(|c: char| c == '\n' || c == '\r') {
            return Err(SankeyError::parse(
                line,
                format!("label {:?} contains a line break", label),
            ));
        }
    }
    if source == target {
        return Err(SankeyError::parse(
            line,
            format!("'{}' flows into itself", source),
        ));
    }

    if raw_value.is_empty() {
        return Err(SankeyError::parse(line, "value is empty"));
    }
    let value = Amount::parse(raw_value).ok_or_else(|| {
        SankeyError::parse(line, format!("value '{}' is not a number", raw_value))
    })?;
    if value.value() < 0.0 {
        return Err(SankeyError::parse(
            line,
            format!("value '{}' is negative", raw_value),
        ));
    }

    Ok(FlowRecord {
        source: source.to_string(),
        target: target.to_string(),
        value,
        line,
    })
}
