use std::{fmt, time::Duration};

use lib_core::{CliError, CliErrorDetails, CliErrorTrait, IPINFO_URL, REQUEST_TIMEOUT_MS};
use reqwest::{header, Client, RequestBuilder};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

const USER_AGENT: &'static str = concat!("public-ip/", env!("CARGO_PKG_VERSION"));
const JSON_MIME: &'static str = "application/json";

/// Why a lookup produced no address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Timeout,
    /// Any transport failure before a response arrived (DNS, refused,
    /// unreachable).
    NetworkUnreachable,
    HttpError {
        status: u16,
        status_text: String,
    },
    InvalidContentType,
    InvalidJsonShape,
    FieldMissing,
    Unknown(Option<String>),
}

impl FailureReason {
    pub fn message(&self) -> String {
        match self {
            FailureReason::Timeout => {
                "Request timed out. Please check your internet connection.".to_string()
            }
            FailureReason::NetworkUnreachable => {
                "Network connection failed. Please check your internet connection.".to_string()
            }
            FailureReason::HttpError {
                status,
                status_text,
            } => format!("HTTP error! Status: {} - {}", status, status_text),
            FailureReason::InvalidContentType => {
                "Invalid response format. Expected JSON.".to_string()
            }
            FailureReason::InvalidJsonShape => "Invalid response data received.".to_string(),
            FailureReason::FieldMissing => {
                "Could not retrieve IP address from the service.".to_string()
            }
            FailureReason::Unknown(Some(message)) if !message.is_empty() => message.clone(),
            FailureReason::Unknown(_) => "An unexpected error occurred.".to_string(),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FailureReason::HttpError { .. } => {
                Some("The IP service may be temporarily unavailable. Please try again later.")
            }
            FailureReason::InvalidContentType | FailureReason::InvalidJsonShape => {
                Some("Please try again later.")
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct LookupError {
    reason: FailureReason,
    context: String,
    message: String,
    debug: Option<String>,
}

impl LookupError {
    #[track_caller]
    pub fn new(reason: FailureReason) -> Self {
        LookupError {
            context: std::backtrace::Backtrace::force_capture().to_string(),
            message: reason.message(),
            reason,
            debug: None,
        }
    }

    #[track_caller]
    pub fn with_debug<D>(reason: FailureReason, debug: &D) -> Self
    where
        D: fmt::Debug,
    {
        LookupError {
            debug: Some(format!("{:?}", debug)),
            ..Self::new(reason)
        }
    }

    pub fn reason(&self) -> &FailureReason {
        &self.reason
    }
}

impl CliErrorTrait for LookupError {
    fn details(&self) -> CliErrorDetails {
        CliErrorDetails {
            context: &self.context,
            message: &self.message,
            hint: self.reason.hint(),
            debug: self.debug.as_deref(),
        }
    }
}

impl From<LookupError> for CliError {
    fn from(error: LookupError) -> CliError {
        Box::new(error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub ip: String,
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

#[derive(Debug, Clone)]
pub struct IpResolver {
    endpoint: String,
    timeout: Duration,
}

impl Default for IpResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IpResolver {
    pub fn new() -> Self {
        Self::with_endpoint(IPINFO_URL, Duration::from_millis(REQUEST_TIMEOUT_MS))
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Self {
        IpResolver {
            endpoint: endpoint.to_string(),
            timeout,
        }
    }

    /// Single-shot lookup. The timeout covers the whole exchange, body
    /// included; when it fires the in-flight request is dropped.
    pub async fn lookup(&self) -> Result<LookupResult, LookupError> {
        let client = Client::builder().user_agent(USER_AGENT).build().map_err(|e| {
            LookupError::with_debug(FailureReason::Unknown(Some(e.to_string())), &e)
        })?;
        let request = client
            .get(&self.endpoint)
            .header(header::ACCEPT, JSON_MIME);
        log::debug!("Requesting public IP from '{}'...", self.endpoint);

        let cancel = CancellationToken::new();
        let timer = tokio::spawn({
            let cancel = cancel.clone();
            let timeout = self.timeout;
            async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            }
        });

        let payload = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Request cancelled after {}ms.", self.timeout.as_millis());
                Err(LookupError::new(FailureReason::Timeout))
            }
            payload = fetch_json(request) => payload,
        };
        timer.abort();

        extract_ip(payload?)
    }
}

async fn fetch_json(request: RequestBuilder) -> Result<Value, LookupError> {
    let response = request.send().await.map_err(|e| {
        let reason = if e.is_timeout() {
            FailureReason::Timeout
        } else {
            FailureReason::NetworkUnreachable
        };
        LookupError::with_debug(reason, &e)
    })?;

    let status = response.status();
    log::debug!("Received response with status {}.", status);
    if !status.is_success() {
        return Err(LookupError::new(FailureReason::HttpError {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }));
    }

    // Substring match, not a MIME parse.
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.contains(JSON_MIME) {
        return Err(LookupError::with_debug(
            FailureReason::InvalidContentType,
            &content_type,
        ));
    }

    let body = response.bytes().await.map_err(|e| {
        LookupError::with_debug(FailureReason::Unknown(Some(e.to_string())), &e)
    })?;
    serde_json::from_slice(&body)
        .map_err(|e| LookupError::with_debug(FailureReason::Unknown(Some(e.to_string())), &e))
}

fn extract_ip(payload: Value) -> Result<LookupResult, LookupError> {
    let mut fields = match payload {
        Value::Object(fields) => fields,
        // Structured, but can never carry an 'ip' field.
        Value::Array(_) => return Err(LookupError::new(FailureReason::FieldMissing)),
        other => {
            return Err(LookupError::with_debug(
                FailureReason::InvalidJsonShape,
                &other,
            ))
        }
    };

    match fields.remove("ip") {
        Some(Value::String(ip)) if !ip.is_empty() => Ok(LookupResult { ip }),
        other => Err(LookupError::with_debug(FailureReason::FieldMissing, &other)),
    }
}
