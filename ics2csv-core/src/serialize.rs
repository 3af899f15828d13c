//! CSV serialization.

use crate::row::OutputRow;

/// Join the header and rows into one CSV text.
///
/// Fields are joined with `delimiter` and lines with `\n`, header first,
/// without a trailing newline. Fields must already be escaped.
pub fn serialize(header: &[String], rows: &[OutputRow], delimiter: char) -> String {
    let separator = delimiter.to_string();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header.join(separator.as_str()));

    for row in rows {
        debug_assert_eq!(row.len(), header.len(), "row does not match header");
        lines.push(row.fields().join(separator.as_str()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_then_rows() {
        let header = strings(&["A", "B"]);
        let rows = vec![
            OutputRow(strings(&["1", "2"])),
            OutputRow(strings(&["3", "\"x,y\""])),
        ];
        assert_eq!(serialize(&header, &rows, ','), "A,B\n1,2\n3,\"x,y\"");
    }

    #[test]
    fn test_semicolon_delimiter() {
        let header = strings(&["A", "B"]);
        let rows = vec![OutputRow(strings(&["\"1\"", "\"2\""]))];
        assert_eq!(serialize(&header, &rows, ';'), "A;B\n\"1\";\"2\"");
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let header = strings(&["A", "B"]);
        assert_eq!(serialize(&header, &[], ','), "A,B");
    }

    #[test]
    fn test_serializing_twice_is_identical() {
        let header = strings(&["A"]);
        let rows = vec![OutputRow(strings(&["Reunião"]))];
        assert_eq!(serialize(&header, &rows, ','), serialize(&header, &rows, ','));
    }
}
