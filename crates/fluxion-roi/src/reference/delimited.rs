// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Comma-delimited text parsing for the reference datasets.
//!
//! A comma separates two fields only when an even number of `"` characters
//! follows it on the same line. Commas inside a quoted field are therefore kept
//! as part of the field, e.g. `"Kanto, east",40` is two cells.

/// Parse a whole table. Blank lines are dropped; the header row is returned
/// like any other row.
pub fn parse_table(text: &str) -> Vec<Vec<String>> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_row)
        .collect()
}

/// Split one line into cleaned cells
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim_end_matches('\r');
    let total_quotes = line.chars().filter(|c| *c == '"').count();

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut quotes_seen = 0_usize;

    for ch in line.chars() {
        match ch {
            '"' => {
                quotes_seen += 1;
                current.push(ch);
            }
            ',' if (total_quotes - quotes_seen) & 1 == 0 => {
                cells.push(clean_cell(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    cells.push(clean_cell(&current));
    cells
}

/// Trim whitespace and unwrap a fully quoted cell (`""` becomes `"`)
pub fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\"").trim().to_owned(),
        None => trimmed.to_owned(),
    }
}

/// Parse a numeric cell, tolerating thousands separators, a trailing `%`
/// and a leading currency sign
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .trim()
        .trim_start_matches(['¥', '￥', '$'])
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split() {
        assert_eq!(split_row("Tokyo,40,tokyo"), vec!["Tokyo", "40", "tokyo"]);
    }

    #[test]
    fn test_quoted_field_keeps_comma() {
        assert_eq!(
            split_row(r#""Kanto, east",40,kanto"#),
            vec!["Kanto, east", "40", "kanto"]
        );
    }

    #[test]
    fn test_quoted_number_with_thousands_separator() {
        let cells = split_row(r#"2024/1/5,"1,234.5",12.1"#);
        assert_eq!(cells, vec!["2024/1/5", "1,234.5", "12.1"]);
        assert_eq!(parse_number(&cells[1]), Some(1234.5));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            split_row("  Osaka ,  35 , osaka  "),
            vec!["Osaka", "35", "osaka"]
        );
        assert_eq!(split_row(r#" " Osaka " ,35"#), vec!["Osaka", "35"]);
    }

    #[test]
    fn test_wrapped_quotes_are_removed_and_escapes_collapsed() {
        assert_eq!(clean_cell(r#""plain""#), "plain");
        assert_eq!(clean_cell(r#""say ""hi""""#), r#"say "hi""#);
        // unbalanced quote is left as-is
        assert_eq!(clean_cell(r#""open"#), r#""open"#);
    }

    #[test]
    fn test_empty_cells_survive() {
        assert_eq!(split_row("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_parse_table_skips_blank_lines_and_crlf() {
        let text = "\u{feff}area,rate,column\r\nTokyo,40,tokyo\r\n\r\n\"Kanto, east\",38,kanto\r\n";
        let rows = parse_table(text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["area", "rate", "column"]);
        assert_eq!(rows[2], vec!["Kanto, east", "38", "kanto"]);
    }

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number("40"), Some(40.0));
        assert_eq!(parse_number("40%"), Some(40.0));
        assert_eq!(parse_number(" ¥1,200 "), Some(1200.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
