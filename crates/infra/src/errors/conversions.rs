//! Conversions from external infrastructure errors into domain errors.

use leadflow_domain::LeadflowError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LeadflowError);

impl From<InfraError> for LeadflowError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LeadflowError> for InfraError {
    fn from(value: LeadflowError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoLeadflowError {
    fn into_leadflow(self) -> LeadflowError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LeadflowError */
/* -------------------------------------------------------------------------- */

impl IntoLeadflowError for HttpError {
    fn into_leadflow(self) -> LeadflowError {
        if self.is_timeout() {
            return LeadflowError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return LeadflowError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return LeadflowError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return LeadflowError::Internal(format!("failed to decode HTTP body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => LeadflowError::Auth(message),
                404 => LeadflowError::NotFound(message),
                400..=499 => LeadflowError::InvalidInput(message),
                _ => LeadflowError::Network(message),
            };
        }

        LeadflowError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_leadflow())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → LeadflowError */
/* -------------------------------------------------------------------------- */

impl IntoLeadflowError for UrlError {
    fn into_leadflow(self) -> LeadflowError {
        LeadflowError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_leadflow())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
