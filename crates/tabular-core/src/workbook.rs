//! Excel workbook serialization for extracted tables.

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::error::TabularError;
use crate::types::Table;

/// Padding added to the longest cell when sizing a column.
const COLUMN_WIDTH_PADDING: usize = 2;

/// Cap on rendered column width, in characters.
const MAX_COLUMN_WIDTH: usize = 50;

/// Serialize `tables` to an in-memory `.xlsx` workbook, one sheet per
/// table, named `Table_<n>` by 1-based position.
///
/// The builder renders exactly what it is given; substituting a placeholder
/// for an empty set is the caller's responsibility. No formatting beyond
/// column widths is applied.
pub fn build_workbook(tables: &[Table]) -> Result<Vec<u8>, TabularError> {
    let mut workbook = Workbook::new();

    for (index, table) in tables.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(format!("Table_{}", index + 1))
            .map_err(|e| TabularError::Serialization(e.to_string()))?;

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                sheet
                    .write_string(row_idx as u32, col_idx as u16, cell.as_str())
                    .map_err(|e| TabularError::Serialization(e.to_string()))?;
            }
        }

        for (col_idx, width) in column_widths(table).into_iter().enumerate() {
            sheet
                .set_column_width(col_idx as u16, width as f64)
                .map_err(|e| TabularError::Serialization(e.to_string()))?;
        }
    }

    debug!(sheets = tables.len(), "Serializing workbook");
    workbook
        .save_to_buffer()
        .map_err(|e| TabularError::Serialization(e.to_string()))
}

/// Rendered width per column: `min(longest cell + padding, cap)`.
///
/// Rows may be ragged; a row with no cell in a column contributes nothing
/// to that column's width.
fn column_widths(table: &Table) -> Vec<usize> {
    let column_count = table.rows.iter().map(|row| row.len()).max().unwrap_or(0);

    (0..column_count)
        .map(|col| {
            let max_length = table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            (max_length + COLUMN_WIDTH_PADDING).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn grid(rows: &[&[&str]]) -> Table {
        Table::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn read_back(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_workbook_bytes_are_zip() {
        let bytes = build_workbook(&[grid(&[&["a", "b"]])]).unwrap();
        // XLSX is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_one_sheet_per_table_with_positional_names() {
        let tables = vec![
            grid(&[&["A1", "B1"], &["A2", "B2"]]),
            grid(&[&["X1", "Y1", "Z1"], &["X2", "Y2", "Z2"]]),
        ];

        let mut workbook = read_back(build_workbook(&tables).unwrap());
        assert_eq!(workbook.sheet_names(), vec!["Table_1", "Table_2"]);

        let range = workbook.worksheet_range("Table_2").unwrap();
        assert_eq!(range.get_value((0, 2)), Some(&Data::String("Z1".into())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("X2".into())));
    }

    #[test]
    fn test_cells_round_trip_at_their_positions() {
        let table = grid(&[&["Header1", "Header2"], &["Value1", "Value2"]]);

        let mut workbook = read_back(build_workbook(&[table.clone()]).unwrap());
        let range = workbook.worksheet_range("Table_1").unwrap();

        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                assert_eq!(
                    range.get_value((r as u32, c as u32)),
                    Some(&Data::String(cell.clone())),
                    "cell ({r}, {c})"
                );
            }
        }
    }

    #[test]
    fn test_ragged_rows_are_preserved() {
        let table = Table::new(vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ]);

        let mut workbook = read_back(build_workbook(&[table]).unwrap());
        let range = workbook.worksheet_range("Table_1").unwrap();
        assert_eq!(range.get_value((0, 2)), Some(&Data::String("c".into())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("d".into())));
        assert_eq!(range.get_value((1, 1)), None);
    }

    #[test]
    fn test_column_widths_pad_longest_cell() {
        let table = grid(&[&["ab", "x"], &["a", "wider cell"]]);
        assert_eq!(column_widths(&table), vec![4, 12]);
    }

    #[test]
    fn test_column_widths_are_capped() {
        let long = "x".repeat(200);
        let table = Table::new(vec![vec![long]]);
        assert_eq!(column_widths(&table), vec![MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn test_column_widths_empty_column() {
        let table = grid(&[&["", ""]]);
        assert_eq!(column_widths(&table), vec![2, 2]);
    }
}
