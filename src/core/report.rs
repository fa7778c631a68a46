use crate::domain::model::{Record, RunReport, Summary};
use crate::utils::error::Result;

pub const RECORDS_FILENAME: &str = "records.csv";
pub const SUMMARY_FILENAME: &str = "summary.json";

fn describe_average(summary: &Summary) -> String {
    match summary.average_weight {
        Some(average) => format!("the average cubic weight is {:.3} kg", average),
        None => "there is no valid data to compute an average cubic weight".to_string(),
    }
}

/// Text shown to the user. Failure details stay in the logs.
pub fn render_message(report: &RunReport) -> String {
    let summary = &report.summary;
    let body = format!(
        "fetched {} {} products, {} have missing dimensions, {} are valid to use, {}",
        summary.total,
        report.category,
        summary.missing,
        summary.valid,
        describe_average(summary)
    );

    if report.is_complete() {
        format!("We've {}", body)
    } else {
        format!("Data fetching was cut short, we've {}", body)
    }
}

pub fn records_csv(records: &[Record]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

pub fn summary_json(report: &RunReport) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FetchStats, RawSize, Termination, DEFAULT_CONVERSION_FACTOR};
    use chrono::Utc;

    fn report(termination: Termination, average_weight: Option<f64>) -> RunReport {
        RunReport {
            category: "Air Conditioners".to_string(),
            summary: Summary {
                total: 2,
                missing: 1,
                valid: 1,
                average_weight,
            },
            termination,
            stats: FetchStats::default(),
            generated_at: Utc::now(),
            records: Vec::new(),
            output_path: None,
        }
    }

    #[test]
    fn test_success_message() {
        let message = render_message(&report(Termination::Exhausted, Some(162.0)));
        assert_eq!(
            message,
            "We've fetched 2 Air Conditioners products, 1 have missing dimensions, \
             1 are valid to use, the average cubic weight is 162.000 kg"
        );
    }

    #[test]
    fn test_warning_message_hides_failure_detail() {
        let termination = Termination::RequestFailed {
            page: 3,
            url: "http://localhost/api/products/3".to_string(),
            reason: "connection refused".to_string(),
        };
        let message = render_message(&report(termination, None));

        assert!(message.starts_with("Data fetching was cut short"));
        assert!(message.contains("no valid data"));
        assert!(!message.contains("connection refused"));
    }

    #[test]
    fn test_records_csv_has_header_and_rows() {
        let records = vec![Record::from_raw_size(
            RawSize {
                width: 600.0,
                length: 600.0,
                height: 1800.0,
            },
            DEFAULT_CONVERSION_FACTOR,
        )];
        let csv = String::from_utf8(records_csv(&records).unwrap()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("width,length,height,derived_weight,incomplete"));
        assert_eq!(lines.next(), Some("0.6,0.6,1.8,162.0,false"));
    }

    #[test]
    fn test_summary_json_omits_records() {
        let json = summary_json(&report(Termination::Exhausted, Some(162.0))).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

        assert_eq!(value["summary"]["valid"], 1);
        assert_eq!(value["termination"]["kind"], "exhausted");
        assert!(value.get("records").is_none());
    }
}
