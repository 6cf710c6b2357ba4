// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data sources: remote JSON records and the built-in inline datasets.

use std::time::Duration;

use log::debug;
use plotlet_core::{Record, Value};
use serde::{Deserialize, Serialize};

use crate::error::{DataFetchError, Result};

/// The iris measurements used by the scatter demo.
pub const IRIS_URL: &str = "https://s3-us-west-2.amazonaws.com/s.cdpn.io/2004014/iris.json";

/// Field holding the band label in [`GroupedSeries::to_records`] output.
pub const LABEL_FIELD: &str = "label";
/// Field holding the series name in [`GroupedSeries::to_records`] output.
pub const SERIES_FIELD: &str = "series";
/// Field holding the bar value in [`GroupedSeries::to_records`] output.
pub const VALUE_FIELD: &str = "value";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where a chart's records come from.
#[derive(Clone, Debug)]
pub enum DataSource {
    /// Records that are already in memory.
    Inline(Vec<Record>),
    /// A URL serving a JSON array of flat objects.
    Remote {
        /// Request URL.
        url: String,
    },
}

impl DataSource {
    /// A remote source.
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote { url: url.into() }
    }
}

/// The built-in demo datasets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// Iris flower measurements, fetched from [`IRIS_URL`].
    #[default]
    Iris,
    /// Average temperature per month (inline).
    Temperature,
    /// Two value series over labels A, B and C (inline).
    Grouped,
}

impl Dataset {
    /// Returns the inline records for this dataset, or `None` if it is fetched.
    pub fn inline_records(self) -> Option<Vec<Record>> {
        match self {
            Self::Iris => None,
            Self::Temperature => Some(temperature_records()),
            Self::Grouped => Some(GroupedSeries::sample().to_records()),
        }
    }
}

/// HTTP client abstraction so fetches can be faked in tests.
pub trait HttpClient: Send + Sync {
    /// Performs a GET request and returns the response body.
    fn get(&self, url: &str) -> std::result::Result<String, DataFetchError>;
}

/// Blocking `reqwest` client with a request timeout.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    timeout: Duration,
}

impl ReqwestClient {
    /// Creates a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> std::result::Result<String, DataFetchError> {
        let timeout = self.timeout;
        let http = |e: reqwest::Error| DataFetchError::Http {
            url: url.to_string(),
            message: if e.is_timeout() {
                format!("timed out after {timeout:?}")
            } else {
                e.to_string()
            },
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(http)?;
        let response = client.get(url).send().map_err(http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(http)
    }
}

/// Fetches `url` and decodes the body with [`parse_records`].
pub fn fetch_records(
    client: &dyn HttpClient,
    url: &str,
) -> std::result::Result<Vec<Record>, DataFetchError> {
    debug!("fetching records from {url}");
    let body = client.get(url)?;
    let records = parse_records(&body)?;
    debug!("fetched {} records from {url}", records.len());
    Ok(records)
}

/// Decodes a JSON array of flat objects into records.
///
/// Numbers, strings and booleans map to the matching [`Value`]; nested arrays and
/// objects have no flat representation and become [`Value::Null`].
pub fn parse_records(json: &str) -> std::result::Result<Vec<Record>, DataFetchError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| DataFetchError::Parse(e.to_string()))?;
    let serde_json::Value::Array(rows) = value else {
        return Err(DataFetchError::Parse(
            "expected a JSON array of records".to_string(),
        ));
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            serde_json::Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(name, v)| (name, json_value(v)))
                .collect::<Record>()),
            _ => Err(DataFetchError::Parse(format!(
                "record {i} is not a JSON object"
            ))),
        })
        .collect()
}

fn json_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Value::Null
        }
    }
}

/// One named series of a [`GroupedSeries`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    /// Series name (legend label).
    pub name: String,
    /// One value per label, in label order.
    pub values: Vec<f64>,
}

/// Wide-format bar data: shared labels plus one value list per series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupedSeries {
    /// Band labels.
    pub labels: Vec<String>,
    /// Series in legend order.
    pub series: Vec<NamedSeries>,
}

impl GroupedSeries {
    /// Decodes `{ "labels": [...], "series": [{ "name": .., "values": [...] }] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The two-series A/B/C sample.
    pub fn sample() -> Self {
        Self {
            labels: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            series: vec![
                NamedSeries {
                    name: "data".to_string(),
                    values: vec![123.0, 456.0, 789.0],
                },
                NamedSeries {
                    name: "another data".to_string(),
                    values: vec![234.0, 567.0, 891.0],
                },
            ],
        }
    }

    /// Flattens to long-format `{label, series, value}` records, series-major.
    ///
    /// Labels without a value in a series (or values without a label) are dropped.
    pub fn to_records(&self) -> Vec<Record> {
        self.series
            .iter()
            .flat_map(|series| {
                self.labels
                    .iter()
                    .zip(&series.values)
                    .map(|(label, value)| {
                        Record::new()
                            .with(LABEL_FIELD, label.as_str())
                            .with(SERIES_FIELD, series.name.as_str())
                            .with(VALUE_FIELD, *value)
                    })
            })
            .collect()
    }
}

/// Average temperature per month.
pub fn temperature_records() -> Vec<Record> {
    const TEMPERATURES: [i32; 12] = [10, 10, 14, 19, 23, 26, 30, 31, 27, 22, 16, 12];
    (1..)
        .zip(TEMPERATURES)
        .map(|(month, temperature)| {
            Record::new()
                .with("month", month)
                .with("temperature", temperature)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_objects() {
        let records = parse_records(
            r#"[
                {"sepalLength": 5.1, "species": "setosa", "flag": true},
                {"sepalLength": 4.9, "species": "setosa", "nested": [1, 2]}
            ]"#,
        )
        .expect("valid records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].f64("sepalLength"), Some(5.1));
        assert_eq!(records[0].get("flag"), Some(&Value::Bool(true)));
        assert_eq!(records[1].category("species").as_deref(), Some("setosa"));
        assert_eq!(records[1].get("nested"), Some(&Value::Null));
    }

    #[test]
    fn rejects_non_array_bodies() {
        let err = parse_records(r#"{"data": []}"#).expect_err("object body");
        assert!(matches!(err, DataFetchError::Parse(_)));
        let err = parse_records("not json").expect_err("garbage body");
        assert!(matches!(err, DataFetchError::Parse(_)));
    }

    #[test]
    fn rejects_non_object_rows() {
        let err = parse_records(r#"[{"a": 1}, 2]"#).expect_err("scalar row");
        assert_eq!(
            err,
            DataFetchError::Parse("record 1 is not a JSON object".to_string())
        );
    }

    #[test]
    fn grouped_series_flatten_series_major() {
        let records = GroupedSeries::sample().to_records();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].category(LABEL_FIELD).as_deref(), Some("A"));
        assert_eq!(records[0].category(SERIES_FIELD).as_deref(), Some("data"));
        assert_eq!(records[0].f64(VALUE_FIELD), Some(123.0));
        assert_eq!(
            records[3].category(SERIES_FIELD).as_deref(),
            Some("another data")
        );
        assert_eq!(records[5].f64(VALUE_FIELD), Some(891.0));
    }

    #[test]
    fn grouped_series_decode_from_json() {
        let grouped = GroupedSeries::from_json(
            r#"{"labels": ["A", "B"], "series": [{"name": "s", "values": [1, 2, 3]}]}"#,
        )
        .expect("valid grouped series");
        // The third value has no label.
        assert_eq!(grouped.to_records().len(), 2);
        assert!(GroupedSeries::from_json("[]").is_err());
    }

    #[test]
    fn temperature_covers_a_year() {
        let records = temperature_records();
        assert_eq!(records.len(), 12);
        assert_eq!(records[0].f64("month"), Some(1.0));
        assert_eq!(records[0].f64("temperature"), Some(10.0));
        assert_eq!(records[11].f64("month"), Some(12.0));
        assert!(Dataset::Iris.inline_records().is_none());
    }

    struct StaticClient(std::result::Result<String, DataFetchError>);

    impl HttpClient for StaticClient {
        fn get(&self, _url: &str) -> std::result::Result<String, DataFetchError> {
            self.0.clone()
        }
    }

    #[test]
    fn fetch_propagates_client_and_parse_errors() {
        let status = DataFetchError::Status {
            url: IRIS_URL.to_string(),
            status: 503,
        };
        let client = StaticClient(Err(status.clone()));
        assert_eq!(fetch_records(&client, IRIS_URL), Err(status));

        let client = StaticClient(Ok("{}".to_string()));
        assert!(matches!(
            fetch_records(&client, IRIS_URL),
            Err(DataFetchError::Parse(_))
        ));

        let client = StaticClient(Ok(r#"[{"x": 1}]"#.to_string()));
        assert_eq!(fetch_records(&client, IRIS_URL).map(|r| r.len()), Ok(1));
    }
}
