//! Tab-separated corpus loader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::dataset::LabeledExample;
use crate::error::{PolarityError, Result};

/// Load every example from a tab-separated file.
///
/// Blank lines are skipped. A missing file yields
/// [`PolarityError::FileNotFound`]; a malformed line yields
/// [`PolarityError::SchemaMismatch`] naming its 1-based line number.
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PolarityError::from_io_at(e, path))?;
    let examples = read_examples(BufReader::new(file))?;

    log::debug!("loaded {} examples from {}", examples.len(), path.display());
    Ok(examples)
}

/// Read examples from any buffered reader.
///
/// Lines that are not valid UTF-8 are rejected as
/// [`PolarityError::SchemaMismatch`].
pub fn read_examples<R: BufRead>(reader: R) -> Result<Vec<LabeledExample>> {
    let mut examples = Vec::new();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = std::str::from_utf8(&raw).map_err(|e| {
            PolarityError::schema_mismatch(format!("line {}: invalid UTF-8: {e}", index + 1))
        })?;
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        examples.push(parse_line(line, index + 1)?);
    }

    Ok(examples)
}

/// Parse a single `<text>\t<label>` record.
pub fn parse_line(line: &str, line_number: usize) -> Result<LabeledExample> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 2 {
        return Err(PolarityError::schema_mismatch(format!(
            "line {line_number}: expected 2 tab-separated fields, got {}",
            fields.len()
        )));
    }

    let label = parse_label(fields[1], line_number)?;
    Ok(LabeledExample::new(fields[0], label))
}

fn parse_label(raw: &str, line_number: usize) -> Result<bool> {
    let raw = raw.trim();
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(PolarityError::schema_mismatch(format!(
            "line {line_number}: unparseable label {raw:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_line() {
        let example = parse_line("Wow... Loved this place.\t1", 1).unwrap();
        assert_eq!(example.text, "Wow... Loved this place.");
        assert!(example.label);

        let example = parse_line("Crust is not good.\t0", 2).unwrap();
        assert!(!example.label);

        let example = parse_line("Fine.\tFALSE", 3).unwrap();
        assert!(!example.label);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_line("no label here", 7).unwrap_err();
        match err {
            PolarityError::SchemaMismatch(msg) => assert!(msg.contains("line 7")),
            other => panic!("Expected SchemaMismatch, got {other:?}"),
        }

        let err = parse_line("a\tb\t1", 8).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));
    }

    #[test]
    fn test_bad_label() {
        let err = parse_line("Great pizza\tyes", 4).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));

        let err = parse_line("Great pizza\t2", 4).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));
    }

    #[test]
    fn test_read_examples_skips_blank_lines_and_crlf() {
        let input = "Good food\t1\r\n\r\nBad food\t0\n   \nOkay\t1";
        let examples = read_examples(Cursor::new(input)).unwrap();

        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0], LabeledExample::positive("Good food"));
        assert_eq!(examples[1], LabeledExample::negative("Bad food"));
        assert_eq!(examples[2], LabeledExample::positive("Okay"));
    }

    #[test]
    fn test_read_examples_reports_line_number() {
        let input = "Good food\t1\n\nBroken line\n";
        let err = read_examples(Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_read_examples_rejects_invalid_utf8() {
        let input: &[u8] = b"good\t1\nbad \xff food\t0\n";
        let err = read_examples(Cursor::new(input)).unwrap_err();
        match err {
            PolarityError::SchemaMismatch(msg) => {
                assert!(msg.contains("line 2"));
                assert!(msg.contains("UTF-8"));
            }
            other => panic!("Expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_examples("definitely/not/here.tsv").unwrap_err();
        assert!(matches!(err, PolarityError::FileNotFound { .. }));
    }
}
