use crate::core::endpoint::EndpointKind;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors returned by the BGPView client, normalizers, and the command-line driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An endpoint URL template does not contain any recognized placeholder token.
    #[error("invalid endpoint template `{template}`: no recognized placeholder token")]
    InvalidTemplate { template: String },

    /// Every attempt to retrieve a URL failed.
    #[error(
        "GET {url} failed after {attempts} attempt(s); last HTTP status: {}",
        display_status(.last_status)
    )]
    TransportFailure {
        url: String,
        attempts: u32,
        last_status: Option<u16>,
    },

    /// The BGPView API answered with `"status": "error"`.
    #[error("BGPView rejected the {endpoint} lookup for `{value}`: {message}")]
    RemoteError {
        endpoint: EndpointKind,
        value: String,
        message: String,
    },

    /// The JSON payload does not match the shape expected for the endpoint.
    #[error("unexpected {endpoint} payload: `{field}` {reason}")]
    SchemaMismatch {
        endpoint: EndpointKind,
        field: String,
        reason: String,
    },

    #[error("unable to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |status| status.to_string())
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
