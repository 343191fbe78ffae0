//! services/client/src/adapters/http.rs
//!
//! The HTTP adapter, the concrete implementation of the `AttendanceGateway`
//! port. It talks JSON to the record store with a hyper client.

use async_trait::async_trait;
use attendance_core::domain::{AttendanceRecord, AttendanceStatus, NewAttendance};
use attendance_core::ports::{AttendanceGateway, PortError, PortResult};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone)]
pub struct HttpAttendanceGateway {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
}

impl HttpAttendanceGateway {
    /// `base_url` is the store's root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/attendance", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: Request<Full<Bytes>>) -> PortResult<T> {
        let method = request.method().clone();
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?
            .to_bytes();
        debug!(%method, status = status.as_u16(), bytes = body.len(), "Store responded");

        if !status.is_success() {
            return Err(rejected(status, &body));
        }
        serde_json::from_slice(&body)
            .map_err(|e| PortError::Unexpected(format!("Unexpected response body: {}", e)))
    }
}

fn rejected(status: StatusCode, body: &[u8]) -> PortError {
    let message = serde_json::from_slice::<ErrorWire>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        });
    PortError::Rejected {
        status: status.as_u16(),
        message,
    }
}

//=========================================================================================
// "Impure" Wire Structs
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAttendanceWire<'a> {
    last_name: &'a str,
    first_name: &'a str,
    section: &'a str,
    status: &'a str,
}

impl<'a> From<&'a NewAttendance> for CreateAttendanceWire<'a> {
    fn from(entry: &'a NewAttendance) -> Self {
        Self {
            last_name: entry.last_name(),
            first_name: entry.first_name(),
            section: entry.section(),
            status: entry.status().as_str(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWire {
    last_name: String,
    first_name: String,
    section: String,
    status: String,
    date: DateTime<Utc>,
}

impl RecordWire {
    fn to_domain(self) -> PortResult<AttendanceRecord> {
        let status = self
            .status
            .parse::<AttendanceStatus>()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(AttendanceRecord {
            last_name: self.last_name,
            first_name: self.first_name,
            section: self.section,
            status,
            date: self.date,
        })
    }
}

#[derive(Deserialize)]
struct CreateResponseWire {
    record: RecordWire,
}

#[derive(Deserialize)]
struct ErrorWire {
    message: String,
}

//=========================================================================================
// Port Implementation
//=========================================================================================

#[async_trait]
impl AttendanceGateway for HttpAttendanceGateway {
    async fn create_record(&self, entry: &NewAttendance) -> PortResult<AttendanceRecord> {
        let payload = serde_json::to_vec(&CreateAttendanceWire::from(entry))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::from(payload)))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response: CreateResponseWire = self.send(request).await?;
        response.record.to_domain()
    }

    async fn list_records(&self) -> PortResult<Vec<AttendanceRecord>> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.endpoint())
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::new()))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let records: Vec<RecordWire> = self.send(request).await?;
        records.into_iter().map(RecordWire::to_domain).collect()
    }
}
