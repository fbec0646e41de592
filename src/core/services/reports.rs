//! CSV attendance reports: generation, listing and download

use chrono::{Days, NaiveDate};
use serde_json::{Value, json};

use crate::core::endpoints::reports as routes;
use crate::core::error::HttpError;
use crate::core::http::ApiClient;

/// Range used when the caller does not pick dates
pub const DEFAULT_RANGE_DAYS: u64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whose attendance the report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportScope {
    Student(String),
    Class(String),
}

impl ReportScope {
    pub fn report_type(&self) -> &'static str {
        match self {
            ReportScope::Student(_) => "student",
            ReportScope::Class(_) => "class",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub scope: ReportScope,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportRequest {
    pub fn new(scope: ReportScope, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            scope,
            start_date,
            end_date,
        }
    }

    /// The last [`DEFAULT_RANGE_DAYS`] days up to `today`
    pub fn recent(scope: ReportScope, today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(DEFAULT_RANGE_DAYS))
            .unwrap_or(today);
        Self::new(scope, start, today)
    }

    fn to_json(&self) -> Value {
        let mut body = json!({
            "report_type": self.scope.report_type(),
            "start_date": self.start_date.format(DATE_FORMAT).to_string(),
            "end_date": self.end_date.format(DATE_FORMAT).to_string(),
            "format": "csv",
        });
        match &self.scope {
            ReportScope::Student(id) => body["student_id"] = Value::from(id.as_str()),
            ReportScope::Class(id) => body["class_id"] = Value::from(id.as_str()),
        }
        body
    }
}

/// File name offered to the browser, e.g. `student-report-Ada-Lovelace-2024-05-01.csv`
pub fn download_file_name(scope: &ReportScope, name: &str, today: NaiveDate) -> String {
    format!(
        "{}-report-{}-{}.csv",
        scope.report_type(),
        name.split_whitespace().collect::<Vec<_>>().join("-"),
        today.format(DATE_FORMAT)
    )
}

/// Generated report together with its CSV content
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDownload {
    pub report: Value,
    pub file_name: String,
    pub content: Vec<u8>,
}

pub struct ReportsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn generate(&self, request: &ReportRequest) -> Result<Value, HttpError> {
        self.client.post(routes::GENERATE, &request.to_json()).await
    }

    pub async fn list(&self) -> Result<Value, HttpError> {
        self.client.get(routes::LIST).await
    }

    /// Raw CSV bytes of a generated report
    pub async fn download(&self, report_id: &str) -> Result<Vec<u8>, HttpError> {
        self.client.download(&routes::download(report_id)).await
    }

    /// Generate a report and fetch its file in one go
    pub async fn generate_and_download(
        &self,
        request: &ReportRequest,
        name: &str,
        today: NaiveDate,
    ) -> Result<ReportDownload, HttpError> {
        let report = self.generate(request).await?;
        let id = match &report["id"] {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return Err(HttpError::Decode("report response has no id".to_string())),
        };
        tracing::info!(report_id = %id, "Report generated, downloading");
        let content = self.download(&id).await?;
        Ok(ReportDownload {
            report,
            file_name: download_file_name(&request.scope, name, today),
            content,
        })
    }
}
