//! Reader for the comma-separated roster exports.
//!
//! The published files are plain CSV with two quirks worth naming: lines
//! beginning with `#` are commentary, and office names containing commas
//! arrive double-quoted. Cells are trimmed; quote characters are dropped.
//! No escape sequences exist in this data.

/// A parsed sheet: one header row plus zero or more data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Error returned when CSV text cannot form a sheet.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SheetError {
    /// The input had no header row (empty or comments only).
    #[error("sheet has no header row")]
    Empty,
}

/// Borrowed view of one data row; missing trailing cells read as empty.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [String],
}

impl Sheet {
    /// Parse CSV text into a sheet.
    ///
    /// Blank lines and `#`-comment lines are skipped; the first remaining
    /// line is the header.
    ///
    /// # Errors
    /// Returns [`SheetError::Empty`] if no header row is present.
    pub fn parse(text: &str) -> Result<Self, SheetError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let headers = lines.next().map(split_line).ok_or(SheetError::Empty)?;
        let rows = lines.map(split_line).collect();

        Ok(Self { headers, rows })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of a header column by exact name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row { cells })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> Row<'a> {
    /// Cell at a column index; out-of-range reads as the empty string.
    #[must_use]
    pub fn get(&self, column: usize) -> &'a str {
        self.cells.get(column).map_or("", String::as_str)
    }
}

/// Split one line on commas, honoring double-quote grouping.
///
/// Quote characters toggle grouping and are not emitted; every cell is
/// trimmed.
fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let sheet = Sheet::parse("A,B,C\n1,2,3\n4,5,6").expect("valid");
        assert_eq!(sheet.headers(), ["A", "B", "C"]);
        assert_eq!(sheet.len(), 2);
        let first = sheet.rows().next().expect("row");
        assert_eq!(first.get(0), "1");
        assert_eq!(first.get(2), "3");
    }

    #[test]
    fn quoted_commas_do_not_split() {
        let sheet = Sheet::parse("Name,Office\nAlice,\"Room 5, South Wing\"").expect("valid");
        let row = sheet.rows().next().expect("row");
        assert_eq!(row.get(1), "Room 5, South Wing");
    }

    #[test]
    fn quote_characters_are_dropped() {
        let sheet = Sheet::parse("Name\n\"Alice\"").expect("valid");
        let row = sheet.rows().next().expect("row");
        assert_eq!(row.get(0), "Alice");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# Wisconsin State Senate roster\n\nName,District\n# mid-file note\nAlice,26\n\n";
        let sheet = Sheet::parse(text).expect("valid");
        assert_eq!(sheet.headers(), ["Name", "District"]);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let sheet = Sheet::parse("A,B\r\n1,2\r\n").expect("valid");
        let row = sheet.rows().next().expect("row");
        assert_eq!(row.get(1), "2");
    }

    #[test]
    fn cells_are_trimmed() {
        let sheet = Sheet::parse("A, B \n 1 ,  2  ").expect("valid");
        assert_eq!(sheet.headers(), ["A", "B"]);
        let row = sheet.rows().next().expect("row");
        assert_eq!(row.get(0), "1");
        assert_eq!(row.get(1), "2");
    }

    #[test]
    fn short_rows_read_empty_cells() {
        let sheet = Sheet::parse("A,B,C\n1").expect("valid");
        let row = sheet.rows().next().expect("row");
        assert_eq!(row.get(0), "1");
        assert_eq!(row.get(1), "");
        assert_eq!(row.get(2), "");
    }

    #[test]
    fn column_lookup_is_exact() {
        let sheet = Sheet::parse("First Name,Last Name\nKelda,Roys").expect("valid");
        assert_eq!(sheet.column("First Name"), Some(0));
        assert_eq!(sheet.column("first name"), None);
        assert_eq!(sheet.column("Missing"), None);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(Sheet::parse("").unwrap_err(), SheetError::Empty);
        assert_eq!(Sheet::parse("\n\n# only comments\n").unwrap_err(), SheetError::Empty);
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let sheet = Sheet::parse("A,B").expect("valid");
        assert!(sheet.is_empty());
    }
}
