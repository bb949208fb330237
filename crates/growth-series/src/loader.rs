//! Period series file loading.

use std::path::Path;

use tracing::debug;

use growth_core::config::InputFormat;
use growth_core::{PeriodObservation, Series};

use crate::bucket::MonthlyBuckets;
use crate::error::{SeriesError, SeriesResult};

/// How to interpret an input file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Explicit format; inferred from the extension when `None`.
    pub format: Option<InputFormat>,
    /// Sort rows by period before validating instead of requiring order.
    pub sort: bool,
    /// Zero-fill missing months (timestamp input only).
    pub fill_gaps: bool,
}

/// Load a series from `path`.
pub fn load_series(path: &Path, options: &LoadOptions) -> SeriesResult<Series> {
    let format = options
        .format
        .unwrap_or_else(|| InputFormat::from_path(path));
    let content = std::fs::read_to_string(path)?;

    let series = match format {
        InputFormat::Csv => parse_csv(&content, options.sort)?,
        InputFormat::Json => parse_json(&content, options.sort)?,
        InputFormat::Timestamps => {
            MonthlyBuckets::from_lines(&content)?.into_series(options.fill_gaps)?
        }
    };

    debug!(
        path = %path.display(),
        %format,
        periods = series.len(),
        "loaded series"
    );
    Ok(series)
}

/// Parse `period,count` rows.
///
/// Fields may be quoted and are trimmed. Blank lines and lines starting
/// with `#` are skipped. The first record is taken as a header when its
/// count field is not an integer.
pub fn parse_csv(content: &str, sort: bool) -> SeriesResult<Series> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(false)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map_or(idx + 1, |p| p.line() as usize);

        if record.len() != 2 {
            return Err(SeriesError::Parse {
                line,
                message: format!("expected 2 fields, found {}", record.len()),
            });
        }
        let (period, count) = (&record[0], &record[1]);

        if idx == 0 && !is_integer(count) {
            debug!(line, "skipping header row");
            continue;
        }
        if period.is_empty() {
            return Err(SeriesError::Parse {
                line,
                message: "empty period label".to_string(),
            });
        }
        let count = count.parse::<u64>().map_err(|e| SeriesError::Parse {
            line,
            message: format!("invalid count {count:?}: {e}"),
        })?;
        rows.push(PeriodObservation::new(period, count));
    }

    build(rows, sort)
}

/// Optionally signed run of ASCII digits, of any magnitude.
fn is_integer(field: &str) -> bool {
    let digits = field
        .strip_prefix(['-', '+'])
        .unwrap_or(field);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a JSON array of `{"period": .., "count": ..}` objects.
pub fn parse_json(content: &str, sort: bool) -> SeriesResult<Series> {
    let rows: Vec<PeriodObservation> = serde_json::from_str(content)?;
    build(rows, sort)
}

fn build(mut rows: Vec<PeriodObservation>, sort: bool) -> SeriesResult<Series> {
    if sort {
        rows.sort_by(|a, b| a.period.cmp(&b.period));
    }
    Ok(Series::new(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_with_header_and_comments() {
        let csv = "month,posts\n# exported from sqlite\n2023-01,10\n\n2023-02, 20\n";
        let series = parse_csv(csv, false).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[1], PeriodObservation::new("2023-02", 20));
    }

    #[test]
    fn csv_without_header() {
        let series = parse_csv("a,1\nb,2\nc,3", false).unwrap();
        assert_eq!(series.total(), 6);
    }

    #[test]
    fn csv_negative_count_is_rejected() {
        let err = parse_csv("2023-01,10\n2023-02,-4\n", false).unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 2, .. }));
    }

    #[test]
    fn csv_negative_first_row_is_not_a_header() {
        let err = parse_csv("2023-01,-4\n", false).unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 1, .. }));
    }

    #[test]
    fn csv_quoted_fields_without_header() {
        let series = parse_csv("\"2023-01\",\"10\"\n\"2023-02\",\"20\"\n", false).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0], PeriodObservation::new("2023-01", 10));
        assert_eq!(series.total(), 30);
    }

    #[test]
    fn csv_quoted_header_and_comma_in_label() {
        let csv = "\"period\",\"count\"\n\"2023, Q1\",10\n\"2023, Q2\",12\n";
        let series = parse_csv(csv, false).unwrap();
        let periods: Vec<&str> = series.iter().map(|o| o.period.as_str()).collect();
        assert_eq!(periods, vec!["2023, Q1", "2023, Q2"]);
        assert_eq!(series.total(), 22);
    }

    #[test]
    fn csv_first_row_above_i64_max_is_data() {
        let big = u64::MAX / 2 + 1;
        let series = parse_csv(&format!("2023-01,{big}\n2023-02,1\n"), false).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].count, big);
    }

    #[test]
    fn csv_ragged_rows_are_rejected() {
        let err = parse_csv("a,1\nb,2,3\n", false).unwrap_err();
        assert!(matches!(err, SeriesError::Csv(_)));
    }

    #[test]
    fn csv_total_overflow_is_invalid() {
        let half = u64::MAX / 2 + 1;
        let err = parse_csv(&format!("a,{half}\nb,{half}\n"), false).unwrap_err();
        assert!(matches!(err, SeriesError::Invalid(_)));
    }

    #[test]
    fn csv_wrong_field_count() {
        let err = parse_csv("2023-01,10,extra\n", false).unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 1, .. }));
    }

    #[test]
    fn csv_unsorted_rejected_unless_sorting() {
        let csv = "2023-02,20\n2023-01,10\n";
        assert!(matches!(
            parse_csv(csv, false).unwrap_err(),
            SeriesError::Invalid(_)
        ));
        let sorted = parse_csv(csv, true).unwrap();
        assert_eq!(sorted.observations()[0].period, "2023-01");
    }

    #[test]
    fn csv_duplicates_rejected_even_when_sorting() {
        let err = parse_csv("2023-01,1\n2023-01,2\n", true).unwrap_err();
        assert!(matches!(err, SeriesError::Invalid(_)));
    }

    #[test]
    fn json_series() {
        let json = r#"[{"period":"2023-01","count":5},{"period":"2023-02","count":7}]"#;
        let series = parse_json(json, false).unwrap();
        assert_eq!(series.total(), 12);

        assert!(matches!(
            parse_json(r#"[{"period":"x","count":-1}]"#, false).unwrap_err(),
            SeriesError::Json(_)
        ));
    }

    #[test]
    fn load_infers_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("series.json");
        std::fs::write(&json_path, r#"[{"period":"a","count":1}]"#).unwrap();
        let csv_path = dir.path().join("series.csv");
        std::fs::write(&csv_path, "period,count\na,1\nb,2\n").unwrap();

        let options = LoadOptions::default();
        assert_eq!(load_series(&json_path, &options).unwrap().len(), 1);
        assert_eq!(load_series(&csv_path, &options).unwrap().len(), 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_series(Path::new("/nonexistent/series.csv"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, SeriesError::Io(_)));
    }
}
