use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::data::table::DataTable;
use crate::error::{NetError, Result};

/// Converts one raw cell into a number. The error message is wrapped into
/// `NetError::Parse` together with the cell position.
pub type CellParser = Box<dyn Fn(&str) -> std::result::Result<f64, String>>;

/// Default parser: the cell as a plain `f64`.
pub fn parse_f64(cell: &str) -> std::result::Result<f64, String> {
    cell.trim()
        .parse::<f64>()
        .map_err(|e| format!("'{cell}' is not a number: {e}"))
}

struct ColumnDef {
    index: usize,
    name: String,
    parser: CellParser,
}

/// Reads delimited text into a `DataTable`.
///
/// Each defined column picks one field of every record (by position) and
/// runs it through its parser; table columns appear in definition order.
/// When no column is defined and the input has a header, every header field
/// becomes a numeric column parsed with `parse_f64`.
pub struct TableReader {
    has_header: bool,
    delimiter: u8,
    columns: Vec<ColumnDef>,
}

impl TableReader {
    pub fn new(has_header: bool, delimiter: u8) -> TableReader {
        TableReader {
            has_header,
            delimiter,
            columns: Vec::new(),
        }
    }

    pub fn define_column<F>(&mut self, index: usize, name: &str, parser: F) -> &mut TableReader
    where
        F: Fn(&str) -> std::result::Result<f64, String> + 'static,
    {
        self.columns.push(ColumnDef {
            index,
            name: name.to_string(),
            parser: Box::new(parser),
        });
        self
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<DataTable> {
        let file = File::open(&path)?;
        let table = self.read_from(file)?;
        info!(
            "read {} rows x {} columns from {}",
            table.rows(),
            table.cols(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<DataTable> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let header_columns: Vec<ColumnDef>;
        let columns = if self.columns.is_empty() && self.has_header {
            header_columns = rdr
                .headers()?
                .iter()
                .enumerate()
                .map(|(index, name)| ColumnDef {
                    index,
                    name: name.trim().to_string(),
                    parser: Box::new(parse_f64),
                })
                .collect();
            &header_columns
        } else {
            &self.columns
        };

        let mut table = DataTable::new(columns.iter().map(|c| c.name.clone()).collect());
        let mut row = vec![0.0; columns.len()];

        for record in rdr.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            for (slot, def) in row.iter_mut().zip(columns) {
                let cell = record.get(def.index).ok_or_else(|| NetError::Parse {
                    line,
                    column: def.index,
                    message: format!("record has only {} fields", record.len()),
                })?;

                *slot = (def.parser)(cell).map_err(|message| NetError::Parse {
                    line,
                    column: def.index,
                    message,
                })?;
            }

            table.add_row(&row)?;
        }

        debug!("parsed table with columns {:?}", table.columns());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_defined_columns_in_definition_order() {
        let data = "x;y;label\n1.5;2;a\n3;4.25;b\n";
        let mut reader = TableReader::new(true, b';');
        reader
            .define_column(1, "y", parse_f64)
            .define_column(0, "x", parse_f64)
            .define_column(2, "label", |s| match s {
                "a" => Ok(0.0),
                "b" => Ok(1.0),
                other => Err(format!("unknown label {other}")),
            });

        let table = reader.read_from(data.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["y".to_string(), "x".to_string(), "label".to_string()]);
        assert_eq!(table.row(0).unwrap(), vec![2.0, 1.5, 0.0]);
        assert_eq!(table.row(1).unwrap(), vec![4.25, 3.0, 1.0]);
    }

    #[test]
    fn header_defines_columns_when_none_given() {
        let data = "a,b\n1,2\n3,4\n";
        let table = TableReader::new(true, b',').read_from(data.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.column("B").unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn short_record_is_parse_error() {
        let data = "1,2,3\n4,5\n";
        let mut reader = TableReader::new(false, b',');
        reader.define_column(2, "c", parse_f64);

        match reader.read_from(data.as_bytes()) {
            Err(NetError::Parse { line, column, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, 2);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_cell_is_parse_error() {
        let data = "1\nnope\n";
        let mut reader = TableReader::new(false, b',');
        reader.define_column(0, "v", parse_f64);
        assert!(matches!(reader.read_from(data.as_bytes()), Err(NetError::Parse { .. })));
    }
}
