//! CSV import and export.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::error::{Result, WorkbenchError};
use crate::table::{Column, Table, Value};

/// Filename offered when the edited table is downloaded.
pub const DEFAULT_EXPORT_FILENAME: &str = "updated_data.csv";

/// Parse CSV bytes into a table.
///
/// The first record is the header row and is mandatory; a header-only
/// input yields a valid zero-row table. Duplicate header names are
/// disambiguated with numeric suffixes (`a`, `a.1`, `a.2`, ...), the way
/// the pandas reader mangles them. Ragged records surface as a CSV error.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => record?,
        None => {
            return Err(WorkbenchError::Parse(
                "empty input: missing header row".to_string(),
            ))
        }
    };
    let mut columns: Vec<Column> = mangle_headers(&header)
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();
    for record in records {
        let record = record?;
        for (col, field) in columns.iter_mut().zip(record.iter()) {
            col.values.push(Value::parse(field));
        }
    }
    Table::new(columns)
}

/// Rewrite header names so each is unique.
///
/// A repeated name gets a `.N` suffix; if the suffixed name collides with
/// another header, the suffix chains (`a`, `a.1`, `a` becomes `a`, `a.1`,
/// `a.1.1`).
fn mangle_headers(header: &csv::StringRecord) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header.len());
    for field in header.iter() {
        let mut name = field.to_string();
        let mut count = counts.get(&name).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(name.clone(), count + 1);
            name = format!("{}.{}", name, count);
            count = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), count + 1);
        names.push(name);
    }
    names
}

/// Write the table as CSV: header row first, `Null` as an empty field,
/// no index column.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if table.column_count() > 0 {
        wtr.write_record(table.column_names())?;
        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|col| col.values[row].to_string())
                .collect();
            wtr.write_record(&record)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// CSV bytes of the table, for download responses.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;

    fn parse(input: &str) -> Table {
        read_csv(input.as_bytes()).unwrap()
    }

    #[test]
    fn test_read_infers_types() {
        let table = parse("name,count,score\na,1,1.5\nb,2,2.5\n");
        assert_eq!(table.column("name").unwrap().column_type(), ColumnType::Text);
        assert_eq!(
            table.column("count").unwrap().column_type(),
            ColumnType::Integer
        );
        assert_eq!(
            table.column("score").unwrap().column_type(),
            ColumnType::Float
        );
    }

    #[test]
    fn test_read_missing_tokens_become_null() {
        let table = parse("a,b,c\n1,NA,x\n,null,None\n");
        assert_eq!(table.column("a").unwrap().missing_count(), 1);
        assert_eq!(table.column("b").unwrap().missing_count(), 2);
        assert_eq!(table.column("c").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_read_nan_variants_read_missing_and_round_trip() {
        // "NAN" parses as f64 NaN instead of matching a missing token;
        // it has to land as a missing cell for export to round-trip.
        let table = parse("name,score\na,NAN\nb,-nan\n");
        assert_eq!(table.column("score").unwrap().missing_count(), 2);
        let bytes = to_csv_bytes(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "name,score\na,\nb,\n"
        );
        let reread = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(table, reread);
    }

    #[test]
    fn test_read_empty_input_is_error() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, WorkbenchError::Parse(_)));
    }

    #[test]
    fn test_read_header_only_is_valid() {
        let table = parse("a,b\n");
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_read_mangles_duplicate_headers() {
        let table = parse("a,a,b,a\n1,2,3,4\n");
        assert_eq!(table.column_names(), vec!["a", "a.1", "b", "a.2"]);
    }

    #[test]
    fn test_read_mangle_avoids_existing_suffix() {
        // A literal "a.1" header forces the second "a" one suffix further.
        let table = parse("a,a.1,a\n1,2,3\n");
        assert_eq!(table.column_names(), vec!["a", "a.1", "a.1.1"]);
    }

    #[test]
    fn test_read_ragged_record_is_error() {
        let err = read_csv("a,b\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, WorkbenchError::Csv(_)));
    }

    #[test]
    fn test_write_nulls_as_empty_fields() {
        let table = parse("name,count\na,1\nb,\n");
        let bytes = to_csv_bytes(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "name,count\na,1\nb,\n");
    }

    #[test]
    fn test_round_trip_preserves_table() {
        let input = "name,count,score\na,1,1.5\nb,,2.0\n,3,\n";
        let table = parse(input);
        let bytes = to_csv_bytes(&table).unwrap();
        let reread = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(table, reread);
    }

    #[test]
    fn test_round_trip_quoted_fields() {
        let mut table = parse("note\nplain\n");
        table.set_cell("note", 0, "a, \"quoted\" value").unwrap();
        let bytes = to_csv_bytes(&table).unwrap();
        let reread = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(
            reread.column("note").unwrap().values[0],
            Value::Text("a, \"quoted\" value".into())
        );
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(DEFAULT_EXPORT_FILENAME, "updated_data.csv");
    }
}
