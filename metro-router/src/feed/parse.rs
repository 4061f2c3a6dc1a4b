//! Row reading for feed tables.
//!
//! Tables are CSV with a header row. Quoted fields may contain commas; rows
//! may have fewer columns than the header.

use std::str::FromStr;

use csv::StringRecord;

use super::error::IngestError;
use super::tables::Table;

/// One data row of a table.
#[derive(Debug)]
pub(crate) struct Row {
    table: Table,
    /// 1-based line number in the source text.
    line: usize,
    record: StringRecord,
}

impl Row {
    /// True if the row has at least `count` columns.
    pub fn has_columns(&self, count: usize) -> bool {
        self.record.len() >= count
    }

    /// Text of a column, empty if the column is absent.
    pub fn text(&self, column: usize) -> &str {
        self.record.get(column).unwrap_or("")
    }

    /// Parse a required numeric column.
    pub fn number<T: FromStr>(&self, column: usize) -> Result<T, IngestError> {
        let value = self.text(column);
        value.parse().map_err(|_| IngestError::InvalidNumber {
            table: self.table,
            line: self.line,
            column,
            value: value.to_string(),
        })
    }
}

/// Data rows of a table: the header row and blank rows are skipped.
pub(crate) fn rows(table: Table, text: &str) -> impl Iterator<Item = Result<Row, IngestError>> + '_ {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
        .into_records()
        .filter_map(move |record| match record {
            Ok(record) if record.iter().all(str::is_empty) => None,
            Ok(record) => Some(Ok(Row {
                table,
                line: record.position().map_or(0, |p| p.line() as usize),
                record,
            })),
            Err(source) => Some(Err(IngestError::Malformed { table, source })),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rows(table: Table, text: &str) -> Vec<Row> {
        rows(table, text).collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn skips_header_and_blank_rows() {
        let text = "id,name\n1,A\n\n   \n2,B\n";
        let rows = all_rows(Table::Stops, text);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(1), "A");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].text(1), "B");
    }

    #[test]
    fn line_numbers_follow_the_source() {
        let rows = all_rows(Table::Stops, "id,name\n1,A\n2,B\n3,C\n");

        let lines: Vec<_> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[test]
    fn handles_crlf() {
        let rows = all_rows(Table::Stops, "id,name\r\n1,A\r\n2,B\r\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text(1), "B");
    }

    #[test]
    fn quoted_fields_keep_commas_and_lose_quotes() {
        let text = "stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon\n\
                    2,CP,\"Connaught Place, Block A\",,28.6315,77.2167\n\
                    1,RCK,\"Rajiv Chowk\",,28.6328,77.2197\n";
        let rows = all_rows(Table::Stops, text);

        assert!(rows[0].has_columns(6));
        assert!(!rows[0].has_columns(7));
        assert_eq!(rows[0].text(2), "Connaught Place, Block A");
        assert_eq!(rows[0].number::<f64>(4).unwrap(), 28.6315);
        assert_eq!(rows[1].text(2), "Rajiv Chowk");
    }

    #[test]
    fn header_only_table_has_no_rows() {
        assert_eq!(rows(Table::Routes, "route_id,agency_id\n").count(), 0);
        assert_eq!(rows(Table::Routes, "").count(), 0);
    }

    #[test]
    fn columns_and_missing_fields() {
        let rows = all_rows(Table::Routes, "a,b,c,d,e\n1,,x, Red Line \n");
        let row = &rows[0];

        assert!(row.has_columns(4));
        assert!(!row.has_columns(5));
        assert_eq!(row.text(1), "");
        assert_eq!(row.text(3), "Red Line");
        assert_eq!(row.text(7), "");
    }

    #[test]
    fn numbers_parse_with_surrounding_whitespace() {
        let rows = all_rows(Table::Stops, "id,lat\n 12 ,28.61\n");

        assert_eq!(rows[0].number::<i32>(0).unwrap(), 12);
        assert_eq!(rows[0].number::<f64>(1).unwrap(), 28.61);
    }

    #[test]
    fn bad_number_reports_location() {
        let text = "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
                    T1,08:00:00,08:00:00,abc,1\n";
        let rows = all_rows(Table::StopTimes, text);

        match rows[0].number::<i32>(3) {
            Err(IngestError::InvalidNumber {
                table,
                line,
                column,
                value,
            }) => {
                assert_eq!(table, Table::StopTimes);
                assert_eq!(line, 2);
                assert_eq!(column, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
