use core::fmt::{Display, Formatter, Result as FmtResult};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Header the API uses to report how many requests remain in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// The classified result of a single endpoint request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// The request succeeded and its body decoded.
    Found(T),

    /// The API refused the request (403), usually because the rate limit was reached.
    RateLimited(Quota),

    /// The resource does not exist (404).
    NotFound,

    /// Any other non-2xx status, a transport failure, or an undecodable body.
    TransientError(HttpStatus),
}

/// Why an endpoint produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NotFound,
    RateLimited(Quota),
    Transient(HttpStatus),
}

/// Remaining request quota as reported by the API, if it reported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Quota(pub Option<u64>);

/// HTTP status of a failed request; `None` when no response was received or its body was unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct HttpStatus(pub Option<u16>);

impl<T> FetchOutcome<T> {
    /// Splits this outcome into its data or the reason there is none.
    pub fn into_result(self) -> Result<T, FailureReason> {
        match self {
            Self::Found(data) => Ok(data),
            Self::RateLimited(quota) => Err(FailureReason::RateLimited(quota)),
            Self::NotFound => Err(FailureReason::NotFound),
            Self::TransientError(status) => Err(FailureReason::Transient(status)),
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            Self::Found(data) => FetchOutcome::Found(f(data)),
            Self::RateLimited(quota) => FetchOutcome::RateLimited(quota),
            Self::NotFound => FetchOutcome::NotFound,
            Self::TransientError(status) => FetchOutcome::TransientError(status),
        }
    }

    /// Returns a string describing the status of this outcome.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::RateLimited(_) => "RateLimited",
            Self::NotFound => "NotFound",
            Self::TransientError(_) => "TransientError",
        }
    }
}

impl<T> From<FailureReason> for FetchOutcome<T> {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::NotFound => Self::NotFound,
            FailureReason::RateLimited(quota) => Self::RateLimited(quota),
            FailureReason::Transient(status) => Self::TransientError(status),
        }
    }
}

/// Classify a non-success response.
#[must_use]
pub fn classify(status: StatusCode, headers: &HeaderMap) -> FailureReason {
    match status {
        StatusCode::NOT_FOUND => FailureReason::NotFound,
        StatusCode::FORBIDDEN => FailureReason::RateLimited(Quota::from_headers(headers)),
        other => FailureReason::Transient(HttpStatus::from(other)),
    }
}

impl Quota {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(
            headers
                .get(RATE_LIMIT_REMAINING_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok()),
        )
    }
}

impl Display for Quota {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Some(remaining) => write!(f, "{remaining}"),
            None => write!(f, "unknown"),
        }
    }
}

impl HttpStatus {
    pub const NONE: Self = Self(None);
}

impl From<StatusCode> for HttpStatus {
    fn from(status: StatusCode) -> Self {
        Self(Some(status.as_u16()))
    }
}

impl Display for HttpStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Some(code) => write!(f, "{code}"),
            None => write!(f, "no usable response"),
        }
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::RateLimited(quota) => write!(f, "rate limited (remaining requests: {quota})"),
            Self::Transient(status) => write!(f, "request failed (status: {status})"),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with_remaining(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_classify_not_found() {
        assert_eq!(classify(StatusCode::NOT_FOUND, &HeaderMap::new()), FailureReason::NotFound);
    }

    #[test]
    fn test_classify_forbidden_reads_quota() {
        let reason = classify(StatusCode::FORBIDDEN, &headers_with_remaining("0"));
        assert_eq!(reason, FailureReason::RateLimited(Quota(Some(0))));
    }

    #[test]
    fn test_classify_forbidden_without_header() {
        let reason = classify(StatusCode::FORBIDDEN, &HeaderMap::new());
        assert_eq!(reason, FailureReason::RateLimited(Quota(None)));
        assert_eq!(Quota(None).to_string(), "unknown");
    }

    #[test]
    fn test_classify_garbled_quota_is_unknown() {
        let reason = classify(StatusCode::FORBIDDEN, &headers_with_remaining("lots"));
        assert_eq!(reason, FailureReason::RateLimited(Quota(None)));
    }

    #[test]
    fn test_classify_other_statuses_are_transient() {
        for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::BAD_GATEWAY, StatusCode::UNAUTHORIZED, StatusCode::CONFLICT] {
            assert_eq!(
                classify(status, &HeaderMap::new()),
                FailureReason::Transient(HttpStatus(Some(status.as_u16())))
            );
        }
    }

    #[test]
    fn test_into_result_round_trips_reason() {
        let outcome: FetchOutcome<Vec<u8>> = FetchOutcome::RateLimited(Quota(Some(3)));
        let reason = outcome.into_result().unwrap_err();
        assert_eq!(FetchOutcome::<Vec<u8>>::from(reason), FetchOutcome::RateLimited(Quota(Some(3))));
    }

    #[test]
    fn test_map_preserves_failure() {
        let outcome: FetchOutcome<u32> = FetchOutcome::TransientError(HttpStatus(Some(502)));
        assert_eq!(outcome.map(|v| v + 1), FetchOutcome::TransientError(HttpStatus(Some(502))));
        assert_eq!(FetchOutcome::Found(1).map(|v| v + 1), FetchOutcome::Found(2));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(HttpStatus(Some(503)).to_string(), "503");
        assert_eq!(HttpStatus::NONE.to_string(), "no usable response");
    }
}
