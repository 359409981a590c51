//! Report exports
//!
//! Pure formatting over [`ClassReportResponse`]. The CSV body is the roster
//! table followed by a `Defaulters` section with its own header.

use csv_async::AsyncWriterBuilder;
use serde_json::Value;

use crate::dto::{ClassReportResponse, StudentReportRow};

use super::error::{ServiceError, ServiceResult};

pub const CSV_HEADER: [&str; 8] = [
    "roll",
    "name",
    "email",
    "present",
    "total",
    "percentage",
    "status",
    "isDefaulter",
];

pub const DEFAULTERS_HEADER: [&str; 3] = ["roll", "name", "percentage"];

/// Percentages are written with two decimals
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.2}")
}

fn csv_error(e: csv_async::Error) -> ServiceError {
    ServiceError::internal(format!("csv export failed: {e}"))
}

fn roster_record(row: &StudentReportRow) -> [String; 8] {
    [
        row.roll_no.clone(),
        row.name.clone(),
        row.email.clone().unwrap_or_default(),
        row.present.to_string(),
        row.total.to_string(),
        format_percentage(row.percentage),
        row.band.to_string(),
        row.is_defaulter.to_string(),
    ]
}

/// Render a class report as CSV
pub async fn to_csv(report: &ClassReportResponse) -> ServiceResult<String> {
    let mut writer = AsyncWriterBuilder::new()
        .flexible(true)
        .create_writer(Vec::new());

    writer.write_record(&CSV_HEADER).await.map_err(csv_error)?;
    for row in &report.students {
        writer
            .write_record(&roster_record(row))
            .await
            .map_err(csv_error)?;
    }

    writer.write_record(&["Defaulters"]).await.map_err(csv_error)?;
    writer
        .write_record(&DEFAULTERS_HEADER)
        .await
        .map_err(csv_error)?;
    for row in report.defaulter_rows() {
        writer
            .write_record(&[
                row.roll_no.as_str(),
                row.name.as_str(),
                format_percentage(row.percentage).as_str(),
            ])
            .await
            .map_err(csv_error)?;
    }

    writer.flush().await.map_err(|e| ServiceError::internal(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .await
        .map_err(|_| ServiceError::internal("csv export failed: could not finish writer"))?;
    String::from_utf8(bytes).map_err(|e| ServiceError::internal(e.to_string()))
}

/// Render a class report as a JSON document
pub fn to_json(report: &ClassReportResponse) -> ServiceResult<Value> {
    serde_json::to_value(report).map_err(|e| ServiceError::internal(e.to_string()))
}
