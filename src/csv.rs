// src/csv.rs
use std::io::{self, Write};

use crate::engine::ReportRow;

pub const HEADER: [&str; 2] = ["name", "found"];
pub const FOUND: &str = "YES";
pub const NOT_FOUND: &str = "NO";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    Csv,
    Tsv,
}

impl Delim {
    pub fn sep(self) -> char {
        match self { Delim::Csv => ',', Delim::Tsv => '\t' }
    }
    pub fn ext(self) -> &'static str {
        match self { Delim::Csv => "csv", Delim::Tsv => "tsv" }
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line, then one `display,YES|NO` line per row in the given order.
pub fn write_report<W: Write>(mut w: W, rows: &[ReportRow], delim: Delim) -> io::Result<()> {
    let sep = delim.sep();
    write_row(&mut w, &HEADER, sep)?;
    for r in rows {
        let marker = if r.found { FOUND } else { NOT_FOUND };
        write_row(&mut w, &[r.display.as_str(), marker], sep)?;
    }
    Ok(())
}

/// Same bytes as `write_report`, as a String.
pub fn report_to_string(rows: &[ReportRow], delim: Delim) -> String {
    let mut buf: Vec<u8> = Vec::new();
    write_report(&mut buf, rows, delim).expect("writing into a Vec<u8> cannot fail");

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(display: &str, found: bool) -> ReportRow {
        ReportRow { display: s!(display), found }
    }

    #[test]
    fn header_only_for_no_rows() {
        assert_eq!(report_to_string(&[], Delim::Csv), "name,found\n");
    }

    #[test]
    fn rows_keep_order_and_markers() {
        let rows = [row("홍길동", true), row("김민수", false)];
        assert_eq!(report_to_string(&rows, Delim::Csv), "name,found\n홍길동,YES\n김민수,NO\n");
    }

    #[test]
    fn quotes_fields_with_separator_or_quotes() {
        let rows = [row("Kim, Min", true), row("The \"Ace\"", false)];
        assert_eq!(
            report_to_string(&rows, Delim::Csv),
            "name,found\n\"Kim, Min\",YES\n\"The \"\"Ace\"\"\",NO\n"
        );
    }

    #[test]
    fn tsv_uses_tabs_and_leaves_commas_alone() {
        let rows = [row("Kim, Min", true)];
        assert_eq!(report_to_string(&rows, Delim::Tsv), "name\tfound\nKim, Min\tYES\n");
    }

    #[test]
    fn deterministic() {
        let rows = [row("a", true), row("b", false), row("a", true)];
        assert_eq!(report_to_string(&rows, Delim::Csv), report_to_string(&rows, Delim::Csv));
    }
}
