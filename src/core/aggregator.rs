use crate::domain::model::{Record, Summary};

/// Averages `derived_weight` over the records with complete dimensions.
pub fn summarize(records: &[Record]) -> Summary {
    let total = records.len();
    let mut missing = 0;
    let mut weight_sum = 0.0;

    for record in records {
        if record.incomplete {
            missing += 1;
        } else {
            weight_sum += record.derived_weight;
        }
    }

    let valid = total - missing;
    let average_weight = if valid == 0 {
        None
    } else {
        Some(weight_sum / valid as f64)
    };

    Summary {
        total,
        missing,
        valid,
        average_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawSize, DEFAULT_CONVERSION_FACTOR};

    fn record(width: f64, length: f64, height: f64) -> Record {
        Record::from_raw_size(
            RawSize {
                width,
                length,
                height,
            },
            DEFAULT_CONVERSION_FACTOR,
        )
    }

    #[test]
    fn test_incomplete_records_are_excluded_from_average() {
        let records = vec![record(600.0, 600.0, 1800.0), record(0.0, 700.0, 1900.0)];
        let summary = summarize(&records);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.average_weight, Some(162.0));
    }

    #[test]
    fn test_average_over_several_valid_records() {
        let records = vec![
            record(600.0, 600.0, 1800.0),
            record(1000.0, 1000.0, 1000.0),
            record(500.0, 0.0, 500.0),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.valid + summary.missing, summary.total);
        assert_eq!(summary.average_weight, Some((162.0 + 250.0) / 2.0));
    }

    #[test]
    fn test_no_valid_records_has_no_average() {
        let all_missing = summarize(&[record(0.0, 0.0, 0.0)]);
        assert_eq!(all_missing.total, 1);
        assert_eq!(all_missing.valid, 0);
        assert_eq!(all_missing.average_weight, None);

        let empty = summarize(&[]);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.average_weight, None);
    }
}
