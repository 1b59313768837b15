//! Delimited text rendering and parsing of data tables
//!
//! Output rules:
//! - the delimiter is any non-empty string (`","`, `"\t"`, ...)
//! - with quoting enabled, string typed values and header names are wrapped in
//!   single quotes, embedded single quotes are doubled
//! - missing values are empty fields
//! - binary values are `1` / `0`, custom objects their real value projection
//!
//! Parsing accepts the same format back.

use crate::core::{ColumnType, DataSet, Result, SwotError, Value};
use crate::data::{DataTable, DataTableRow};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const QUOTE: char = '\'';

/// Options for reading and writing delimited text
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub delimiter: String,
    pub quote_strings: bool,
    pub has_header: bool,
    pub label_column_index: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            quote_strings: false,
            has_header: false,
            label_column_index: None,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_quoted_strings(mut self, quote_strings: bool) -> Self {
        self.quote_strings = quote_strings;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_label_column(mut self, label_column_index: usize) -> Self {
        self.label_column_index = Some(label_column_index);
        self
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(QUOTE);
    for c in text.chars() {
        if c == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}

/// Render a single value as a field
pub(crate) fn render_field(value: &Value, column_type: ColumnType, quote_strings: bool) -> String {
    if value.is_missing() {
        String::new()
    } else if quote_strings && column_type.is_string_typed() {
        quote(&value.to_string())
    } else {
        value.to_string()
    }
}

/// Render a whole table, one line per datum.
///
/// A header line requires column names.
pub(crate) fn render_table(
    table: &DataTable,
    delimiter: &str,
    quote_strings: bool,
    include_header: bool,
) -> Result<String> {
    let mut output = String::new();

    if include_header {
        let names = table.column_names().ok_or(SwotError::MissingColumnNames)?;
        let header: Vec<String> = names
            .iter()
            .map(|name| if quote_strings { quote(name) } else { name.clone() })
            .collect();
        output.push_str(&header.join(delimiter));
        output.push('\n');
    }

    for row in table.datum_array() {
        let fields: Vec<String> = row
            .values()
            .iter()
            .zip(table.column_types())
            .map(|(value, column_type)| render_field(value, *column_type, quote_strings))
            .collect();
        output.push_str(&fields.join(delimiter));
        output.push('\n');
    }

    Ok(output)
}

/// A field split from a line
#[derive(Debug, PartialEq)]
struct Field {
    text: String,
    quoted: bool,
}

fn split_fields(line: &str, delimiter: &str, quote_strings: bool) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        if quote_strings && rest.starts_with(QUOTE) {
            let body = &rest[1..];
            let mut text = String::new();
            let mut end = None;
            let mut chars = body.char_indices().peekable();
            while let Some((i, c)) = chars.next() {
                if c != QUOTE {
                    text.push(c);
                } else if matches!(chars.peek(), Some((_, QUOTE))) {
                    text.push(QUOTE);
                    chars.next();
                } else {
                    end = Some(1 + i + 1);
                    break;
                }
            }
            let end = end.ok_or_else(|| {
                SwotError::ParseError(format!("Unterminated quote in line: {line}"))
            })?;
            fields.push(Field { text, quoted: true });
            rest = &rest[end..];
        } else {
            match rest.find(delimiter) {
                Some(pos) => {
                    fields.push(Field {
                        text: rest[..pos].to_string(),
                        quoted: false,
                    });
                    rest = &rest[pos..];
                }
                None => {
                    fields.push(Field {
                        text: rest.to_string(),
                        quoted: false,
                    });
                    rest = "";
                }
            }
        }

        if rest.is_empty() {
            break;
        }
        rest = rest.strip_prefix(delimiter).ok_or_else(|| {
            SwotError::ParseError(format!("Expected delimiter after quoted field: {line}"))
        })?;
    }

    Ok(fields)
}

fn parse_field(field: &Field, column_type: ColumnType, column: usize) -> Result<Value> {
    if field.text.is_empty() && !field.quoted {
        return Ok(Value::Missing);
    }

    let invalid = || {
        SwotError::ParseError(format!(
            "Invalid {column_type:?} value at column {column}: {}",
            field.text
        ))
    };

    match column_type {
        ColumnType::Categorical => Ok(Value::Categorical(field.text.clone())),
        ColumnType::Integral => field
            .text
            .trim()
            .parse::<i64>()
            .map(Value::Integral)
            .map_err(|_| invalid()),
        ColumnType::FloatingPoint => field
            .text
            .trim()
            .parse::<f64>()
            .map(Value::FloatingPoint)
            .map_err(|_| invalid()),
        ColumnType::Binary => match field.text.trim() {
            "1" | "true" => Ok(Value::Binary(true)),
            "0" | "false" => Ok(Value::Binary(false)),
            _ => Err(invalid()),
        },
        ColumnType::CustomObject | ColumnType::Unknown => Err(SwotError::ParseError(format!(
            "{column_type:?} column {column} cannot be read from delimited text"
        ))),
    }
}

/// Parse delimited text into a data table with the given column types.
///
/// Empty lines are skipped. Categories are not part of the text; assign them
/// afterwards, e.g. with [`DataTable::add_observed_categories`].
pub fn parse_csv<R: BufRead>(
    reader: R,
    options: &CsvOptions,
    column_types: Vec<ColumnType>,
) -> Result<DataTable> {
    if options.delimiter.is_empty() {
        return Err(SwotError::ParseError("Delimiter must not be empty".to_string()));
    }

    let mut lines = reader.lines();
    let mut column_names = None;

    if options.has_header {
        let header = lines
            .next()
            .transpose()
            .map_err(SwotError::IoError)?
            .ok_or_else(|| SwotError::ParseError("Missing header line".to_string()))?;
        let names: Vec<String> = split_fields(&header, &options.delimiter, options.quote_strings)?
            .into_iter()
            .map(|field| field.text)
            .collect();
        column_names = Some(names);
    }

    let mut table = DataTable::new(
        column_types.clone(),
        column_names,
        options.label_column_index,
        0,
    )?;

    for (line_num, line) in lines.enumerate() {
        let line = line.map_err(SwotError::IoError)?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line, &options.delimiter, options.quote_strings)?;
        if fields.len() != column_types.len() {
            return Err(SwotError::ParseError(format!(
                "Line {} has {} fields, expected {}",
                line_num + 1,
                fields.len(),
                column_types.len()
            )));
        }

        let values = fields
            .iter()
            .zip(&column_types)
            .enumerate()
            .map(|(column, (field, column_type))| parse_field(field, *column_type, column))
            .collect::<Result<Vec<_>>>()?;
        table.append_datum(DataTableRow::new(values, column_types.clone())?)?;
    }

    Ok(table)
}

impl DataTable {
    /// Load a data table from a delimited text file
    pub fn from_csv_file<P: AsRef<Path>>(
        path: P,
        options: &CsvOptions,
        column_types: Vec<ColumnType>,
    ) -> Result<Self> {
        let file = File::open(path).map_err(SwotError::IoError)?;
        parse_csv(BufReader::new(file), options, column_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Datum, TrainableDataSet};
    use std::io::Cursor;

    fn fields(line: &str, delimiter: &str, quoted: bool) -> Vec<String> {
        split_fields(line, delimiter, quoted)
            .unwrap()
            .into_iter()
            .map(|f| f.text)
            .collect()
    }

    fn named_table() -> DataTable {
        let types = vec![
            ColumnType::Categorical,
            ColumnType::FloatingPoint,
            ColumnType::Binary,
            ColumnType::Integral,
        ];
        let mut table = DataTable::new(
            types.clone(),
            Some(vec![
                "name".to_string(),
                "score".to_string(),
                "active".to_string(),
                "visits".to_string(),
            ]),
            None,
            0,
        )
        .unwrap();
        for values in [
            vec![Value::from("o'brien"), Value::from(2.5), Value::from(true), Value::from(3i64)],
            vec![Value::from("smith, jr"), Value::Missing, Value::from(false), Value::Missing],
        ] {
            table
                .append_datum(DataTableRow::new(values, types.clone()).unwrap())
                .unwrap();
        }
        table
    }

    #[test]
    fn test_split_unquoted() {
        assert_eq!(fields("a,b,,c", ",", false), vec!["a", "b", "", "c"]);
        assert_eq!(fields("a,", ",", false), vec!["a", ""]);
        assert_eq!(fields("", ",", false), vec![""]);
        assert_eq!(fields("a::b", "::", false), vec!["a", "b"]);
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(fields("'a,b',1", ",", true), vec!["a,b", "1"]);
        assert_eq!(fields("'it''s',", ",", true), vec!["it's", ""]);
        assert!(split_fields("'open,1", ",", true).is_err());
        assert!(split_fields("'a'b,1", ",", true).is_err());
    }

    #[test]
    fn test_render_table() {
        let table = named_table();
        let csv = table.csv_representation_with_delimiter(",", true, true).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "'name','score','active','visits'");
        assert_eq!(lines[1], "'o''brien',2.5,1,3");
        assert_eq!(lines[2], "'smith, jr',,0,");

        let tsv = table.csv_representation_with_delimiter("\t", false, false).unwrap();
        assert_eq!(tsv.lines().next(), Some("o'brien\t2.5\t1\t3"));
    }

    #[test]
    fn test_header_requires_names() {
        let table = DataTable::with_column_types(vec![ColumnType::Integral]).unwrap();
        assert!(matches!(
            table.csv_representation_with_delimiter(",", false, true),
            Err(SwotError::MissingColumnNames)
        ));
        assert_eq!(
            table.csv_representation_with_delimiter(",", false, false).unwrap(),
            ""
        );
    }

    #[test]
    fn test_round_trip() {
        let table = named_table();
        let csv = table.csv_representation_with_delimiter(",", true, true).unwrap();
        let options = CsvOptions::default()
            .with_quoted_strings(true)
            .with_header(true);
        let parsed = parse_csv(Cursor::new(csv), &options, table.column_types().to_vec()).unwrap();

        assert_eq!(parsed.datum_count(), table.datum_count());
        assert_eq!(parsed.column_count(), table.column_count());
        assert_eq!(parsed.column_names(), table.column_names());
        assert_eq!(parsed.datum_array(), table.datum_array());
    }

    #[test]
    fn test_parse_errors() {
        let types = vec![ColumnType::Integral, ColumnType::Binary];
        let options = CsvOptions::default();
        assert!(parse_csv(Cursor::new("1,2\n"), &options, types.clone()).is_err());
        assert!(parse_csv(Cursor::new("1\n"), &options, types.clone()).is_err());
        assert!(parse_csv(Cursor::new("x,1\n"), &options, types.clone()).is_err());
        assert!(parse_csv(
            Cursor::new("1\n"),
            &options,
            vec![ColumnType::CustomObject]
        )
        .is_err());
        assert!(parse_csv(
            Cursor::new("1,1\n"),
            &CsvOptions::default().with_delimiter(""),
            types
        )
        .is_err());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let types = vec![ColumnType::Integral, ColumnType::Binary];
        let table =
            parse_csv(Cursor::new("1,0\n\n2,true\n"), &CsvOptions::default(), types).unwrap();
        assert_eq!(table.datum_count(), 2);
        assert_eq!(table.datum_at_index(1).value_for_column(1), &Value::Binary(true));
    }
}
