//! Delimited table reading and writing with header preservation.

use crate::errors::{Error, Result};
use crate::records::RawMethodRow;
use std::fs::File;
use std::path::Path;

/// A header row plus data rows, all as text.
///
/// Every row has exactly `headers.len()` cells; short rows are padded with
/// empty cells when read. Rows longer than the header are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of a named column.
    pub fn column(&self, name: &str, path: &Path) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::missing_column(name, path))
    }

    /// `(rows, columns)`, as shown in console shape messages.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open {}: {e}", path.display()),
        ))
    })
}

/// Read a whole table.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        check_width(path, index, record.len(), headers.len())?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

fn check_width(path: &Path, index: usize, found: usize, expected: usize) -> Result<()> {
    if found > expected {
        return Err(Error::row_too_long(path, index, found, expected));
    }
    Ok(())
}

/// Read an extracted method list.
///
/// Returns the header row alongside the typed rows. Trailing cells may be
/// left off; an absent `tags` cell reads as an empty blob.
pub fn read_method_rows(path: &Path) -> Result<(Vec<String>, Vec<RawMethodRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(open(path)?);

    let header_record = reader.headers()?.clone();
    let headers: Vec<String> = header_record.iter().map(str::to_string).collect();
    crate::records::check_columns(&headers, path)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        check_width(path, index, record.len(), headers.len())?;
        rows.push(record.deserialize::<RawMethodRow>(Some(&header_record))?);
    }

    Ok((headers, rows))
}

/// Write a header row and data rows, creating or truncating `path`.
pub fn write_table<H, R>(path: &Path, headers: &[H], rows: R) -> Result<()>
where
    H: AsRef<str>,
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsRef<[u8]>,
{
    let file = File::create(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create {}: {e}", path.display()),
        ))
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(headers.iter().map(|h| -> &str { h.as_ref() }))?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_table_pads_short_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invoked.csv");
        fs::write(
            &path,
            indoc! {"
                parent-FQN,method-name,classification
                a.B,run,tested
                a.B,stop
            "},
        )
        .unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.rows[1], vec!["a.B", "stop", ""]);
        assert_eq!(table.column("method-name", &path).unwrap(), 1);
        assert!(matches!(
            table.column("classification-after", &path),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_read_table_rejects_long_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invoked.csv");
        fs::write(
            &path,
            indoc! {"
                parent-FQN,method-name,classification
                a.B,run,tested
                a.B,m,tested,EXTRA
            "},
        )
        .unwrap();

        match read_table(&path) {
            Err(Error::RowTooLong {
                row,
                found,
                expected,
                ..
            }) => {
                assert_eq!(row, 1);
                assert_eq!(found, 4);
                assert_eq!(expected, 3);
            }
            other => panic!("expected row width error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_method_rows_accepts_short_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("extracted-methods.csv");
        fs::write(
            &path,
            indoc! {r#"
                visibility,parent-FQN,method-name,param-list,return-type,tags,nb-lines
                public,org.x.Y,size,[],int,"{ifs=true, loops=false}"
                private,org.x.Y,reset,[],void
            "#},
        )
        .unwrap();

        let (headers, rows) = read_method_rows(&path).unwrap();
        assert_eq!(headers.len(), 7);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].method_name, "size");
        assert_eq!(rows[0].tags, "{ifs=true, loops=false}");
        assert_eq!(rows[1].return_type, "void");
        assert_eq!(rows[1].tags, "");
    }

    #[test]
    fn test_read_method_rows_rejects_long_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("extracted-methods.csv");
        fs::write(
            &path,
            indoc! {"
                visibility,parent-FQN,method-name,param-list,return-type,tags
                public,org.x.Y,size,[],int,{ifs=true},extra
            "},
        )
        .unwrap();

        assert!(matches!(
            read_method_rows(&path),
            Err(Error::RowTooLong { row: 0, .. })
        ));
    }

    #[test]
    fn test_read_method_rows_ignores_extra_columns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("extracted-methods.csv");
        fs::write(
            &path,
            indoc! {r#"
                visibility,parent-FQN,method-name,param-list,return-type,tags,nb-lines
                public,org.x.Y,size,"[int a, String b]",int,"{ifs=true, loops=false}",4
                private,org.x.Y,reset,[],void,,2
            "#},
        )
        .unwrap();

        let (headers, rows) = read_method_rows(&path).unwrap();
        assert_eq!(headers.len(), 7);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].param_list, "[int a, String b]");
        assert_eq!(rows[0].tags, "{ifs=true, loops=false}");
        assert_eq!(rows[1].tags, "");
    }

    #[test]
    fn test_read_method_rows_requires_columns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("m.csv");
        fs::write(&path, "visibility,parent-FQN,method-name\npublic,a.B,c\n").unwrap();
        assert!(matches!(
            read_method_rows(&path),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_write_then_read_preserves_headers_and_quoting() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let rows = vec![vec!["a, b".to_string(), "x".to_string()]];
        write_table(&path, &["params", "name"], &rows).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["params", "name"]);
        assert_eq!(table.rows, rows);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            read_table(&temp.path().join("absent.csv")),
            Err(Error::Io(_))
        ));
    }
}
