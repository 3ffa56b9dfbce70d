//! Parsers for the raw text blocks.
//! Each non-blank line is one row and fields are separated by commas.
use rayon::prelude::*;

use crate::error::{ObliqueTreeError, Result};


/// Split `text` into `(line number, line)` pairs,
/// dropping blank lines and, if `has_header` is `true`,
/// the first non-blank line.
fn rows(text: &str, has_header: bool) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .skip(usize::from(has_header))
        .collect()
}


/// Parse one field into a finite `f64`.
/// `NaN` and infinities are rejected.
#[inline]
fn parse_field(line: usize, column: usize, field: &str) -> Result<f64> {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(ObliqueTreeError::Parse {
            line,
            column,
            value: field.to_string(),
        }),
    }
}


/// Parse the training block into one `Vec<f64>` per row.
/// 
/// Widths are not checked here;
/// see [`TrainingSet::new`](crate::TrainingSet::new).
/// If several lines are malformed, the first one is reported.
/// 
/// # Example
/// ```
/// use obliquetree::parse_training_set;
/// let points = parse_training_set("0,1.5\n-2,3\n", false).unwrap();
/// assert_eq!(points, vec![vec![0.0, 1.5], vec![-2.0, 3.0]]);
/// ```
pub fn parse_training_set(text: &str, has_header: bool)
    -> Result<Vec<Vec<f64>>>
{
    // Rows are parsed in parallel but the results keep line order.
    rows(text, has_header)
        .into_par_iter()
        .map(|(line, row)| {
            row.split(',')
                .enumerate()
                .map(|(j, field)| parse_field(line, j + 1, field))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}


/// Parse the label block into one integer per row.
/// Integral floats such as `1.0` are accepted,
/// fractional values are not.
pub fn parse_labels(text: &str, has_header: bool) -> Result<Vec<i64>> {
    rows(text, has_header)
        .into_iter()
        .map(|(line, row)| {
            let mut fields = row.split(',');
            let field = fields.next().unwrap_or_default().trim();
            if fields.next().is_some() {
                let message = format!(
                    "line {line} of the label block has more than one field"
                );
                return Err(ObliqueTreeError::Schema(message));
            }

            if let Ok(label) = field.parse::<i64>() {
                return Ok(label);
            }

            let x = parse_field(line, 1, field)?;
            // `i64::MAX as f64` rounds up to 2^63.
            let out_of_range = x >= i64::MAX as f64 || x < i64::MIN as f64;
            if x.fract() != 0.0 || out_of_range {
                return Err(ObliqueTreeError::Parse {
                    line,
                    column: 1,
                    value: field.to_string(),
                });
            }
            Ok(x as i64)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_set_skips_blank_lines_and_header() {
        let text = "x0,x1\n\n 1.0 , 2.0\n3,-4e-1\n\n";
        let points = parse_training_set(text, true).unwrap();
        assert_eq!(points, vec![vec![1.0, 2.0], vec![3.0, -0.4]]);
    }


    #[test]
    fn test_training_set_reports_position() {
        let text = "1,2\n3,abc\n";
        let err = parse_training_set(text, false).unwrap_err();
        match err {
            ObliqueTreeError::Parse { line, column, value } => {
                assert_eq!((line, column), (2, 2));
                assert_eq!(value, "abc");
            },
            other => panic!("unexpected error: {other}"),
        }
    }


    #[test]
    fn test_training_set_rejects_nan() {
        assert!(parse_training_set("1,NaN", false).is_err());
        assert!(parse_training_set("inf,1", false).is_err());
        assert!(parse_training_set("1,,2", false).is_err());
    }


    #[test]
    fn test_training_set_reports_first_bad_line() {
        let mut text = String::new();
        for i in 0..2_000 {
            if i >= 500 && i % 7 == 0 {
                text.push_str("1,oops\n");
            } else {
                text.push_str("1,2\n");
            }
        }
        let err = parse_training_set(&text, false).unwrap_err();
        assert!(matches!(
            err,
            ObliqueTreeError::Parse { line: 505, column: 2, .. }
        ));
    }


    #[test]
    fn test_labels_out_of_range() {
        for text in ["9223372036854775808.0", "1e19", "-1e19"] {
            assert!(matches!(
                parse_labels(text, false),
                Err(ObliqueTreeError::Parse { line: 1, .. })
            ));
        }
        let labels = parse_labels("-9223372036854775808.0\n", false).unwrap();
        assert_eq!(labels, vec![i64::MIN]);
    }


    #[test]
    fn test_labels() {
        let labels = parse_labels("0\n1\n2.0\n-1\n", false).unwrap();
        assert_eq!(labels, vec![0, 1, 2, -1]);
    }


    #[test]
    fn test_labels_reject_fraction_and_extra_fields() {
        assert!(matches!(
            parse_labels("0\n0.5\n", false),
            Err(ObliqueTreeError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_labels("0,1\n", false),
            Err(ObliqueTreeError::Schema(_))
        ));
    }
}
