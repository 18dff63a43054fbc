use crate::core::asn::AsnRecord;
use crate::core::asn_ixs::AsnIxs;
use crate::core::asn_neighbors::{AsnNeighbors, Relation};
use crate::core::asn_prefixes::AsnPrefixes;
use crate::core::endpoint::{EndpointKind, LookupRequest};
use crate::core::errors::{Error, Result};
use crate::core::internet_exchange::InternetExchangeRecord;
use crate::core::ip_address::IpAddressRecord;
use crate::core::json::{self, Fields, JsonResponse};
use crate::core::normalize::{normalize, payload, NormalizedRecord};
use crate::core::prefix::PrefixRecord;
use crate::core::search::SearchResults;
use log::{debug, info, warn};
use reqwest::StatusCode;
use std::env;
use std::fmt::Display;
use std::{thread, time};

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ looks up a single [LookupRequest] using the default client
/// configuration (see [ClientBuilder::new] for the environment variables it reads).
///
/// ```no_run
/// use bgpview::{EndpointKind, LookupRequest};
///
/// let record = bgpview::lookup(&LookupRequest::new(EndpointKind::AsnPeers, 13335))?;
/// for line in record.lines() {
///     println!("{line}");
/// }
/// # Ok::<(), bgpview::Error>(())
/// ```
pub fn lookup(request: &LookupRequest) -> Result<NormalizedRecord> {
    Client::new()?.lookup(request)
}

/// Retrieve a concrete BGPView URL using the default client configuration.
pub fn fetch(url: &str) -> Result<FetchOutcome> {
    Ok(Client::new()?.fetch(url))
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration. The
/// [ClientBuilder] struct provides setters for each configuration value and a
/// [ClientBuilder::build] method to create a [Client] instance.
///
/// ```
/// let client = bgpview::ClientBuilder::new()
///     .url("https://api.bgpview.io")
///     .retry_count(5)
///     .retry_delay(500) // 500 ms
///     .request_timeout(5000) // 5 seconds
///     .retry_timeout(20000) // 20 seconds
///     .build()?;
///
/// assert_eq!(client.retry_count(), 5);
/// # Ok::<(), bgpview::Error>(())
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    retry_count: u32,
    retry_delay: u64,
    request_timeout: u64,
    retry_timeout: u64,
    accept_invalid_certs: bool,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = bgpview::ClientBuilder::default().build()?;
    ///
    /// assert_eq!(client.url(), "https://api.bgpview.io");
    /// assert_eq!(client.retry_count(), 3);
    /// assert_eq!(client.retry_delay(), 1000);
    /// assert_eq!(client.request_timeout(), 10000);
    /// assert_eq!(client.retry_timeout(), 30000);
    /// assert!(!client.accept_invalid_certs());
    /// # Ok::<(), bgpview::Error>(())
    /// ```
    fn default() -> Self {
        Self {
            url: "https://api.bgpview.io".to_string(),
            retry_count: 3,
            retry_delay: 1000,      // 1 second
            request_timeout: 10000, // 10 seconds
            retry_timeout: 30000,   // 30 seconds
            accept_invalid_certs: false,
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `BGPVIEW_URL`
    /// - `BGPVIEW_RETRY_COUNT`
    /// - `BGPVIEW_RETRY_DELAY`
    /// - `BGPVIEW_REQUEST_TIMEOUT`
    /// - `BGPVIEW_RETRY_TIMEOUT`
    /// - `BGPVIEW_ACCEPT_INVALID_CERTS`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            url: get_env_var("BGPVIEW_URL", default.url),
            retry_count: get_env_var("BGPVIEW_RETRY_COUNT", default.retry_count),
            retry_delay: get_env_var("BGPVIEW_RETRY_DELAY", default.retry_delay),
            request_timeout: get_env_var("BGPVIEW_REQUEST_TIMEOUT", default.request_timeout),
            retry_timeout: get_env_var("BGPVIEW_RETRY_TIMEOUT", default.retry_timeout),
            accept_invalid_certs: get_env_var(
                "BGPVIEW_ACCEPT_INVALID_CERTS",
                default.accept_invalid_certs,
            ),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the base URL of the BGPView API; defaults to `https://api.bgpview.io`.
    /// A trailing `/` is trimmed when the client is built.
    pub fn url<'s>(&'s mut self, url: &str) -> &'s mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the number of attempts made to retrieve a URL; defaults to `3`
    /// attempts. At least one attempt is always made.
    pub fn retry_count(&mut self, retry_count: u32) -> &mut Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the delay (in milliseconds) between attempts; defaults to `1000`
    /// milliseconds.
    pub fn retry_delay(&mut self, retry_delay: u64) -> &mut Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Set the timeout (in milliseconds) for a single HTTP request; defaults
    /// to `10000` milliseconds (10 seconds).
    pub fn request_timeout(&mut self, request_timeout: u64) -> &mut Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Set the maximum time (in milliseconds) spent retrying a URL; defaults
    /// to `30000` milliseconds (30 seconds). A retry is only scheduled when it
    /// can start before this deadline.
    pub fn retry_timeout(&mut self, retry_timeout: u64) -> &mut Self {
        self.retry_timeout = retry_timeout;
        self
    }

    /// Accept invalid TLS certificates; defaults to `false`. Only enable this
    /// when you trust the network path to the configured URL.
    pub fn accept_invalid_certs(&mut self, accept_invalid_certs: bool) -> &mut Self {
        self.accept_invalid_certs = accept_invalid_certs;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Result<Client> {
        if self.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for {}", self.url);
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(time::Duration::from_millis(self.request_timeout))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Client {
            url: self.url.trim_end_matches('/').to_string(),
            retry_count: self.retry_count,
            retry_delay: self.retry_delay,
            request_timeout: self.request_timeout,
            retry_timeout: self.retry_timeout,
            accept_invalid_certs: self.accept_invalid_certs,
            http,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Fetch Outcome
-------------------------------------------------------------------------------------------------*/

/// The result of retrieving a BGPView URL.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// An HTTP 200 response with a parseable BGPView envelope. The envelope may still report
    /// `"status": "error"`.
    Success(JsonResponse),

    /// Every attempt failed. `last_status` is the last HTTP status observed, if any response
    /// was received at all.
    TransportFailure {
        attempts: u32,
        last_status: Option<u16>,
    },
}

impl FetchOutcome {
    /// Convert the outcome into a [Result], reporting a failure against `url`.
    pub fn into_result(self, url: &str) -> Result<JsonResponse> {
        match self {
            FetchOutcome::Success(response) => Ok(response),
            FetchOutcome::TransportFailure {
                attempts,
                last_status,
            } => Err(Error::TransportFailure {
                url: url.to_string(),
                attempts,
                last_status,
            }),
        }
    }
}

/*--------------------------------------------------------------------------------------
  Attempt Errors
--------------------------------------------------------------------------------------*/

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("HTTP status {status} with an unparseable body: {source}")]
    Json {
        status: u16,
        source: serde_json::Error,
    },
}

impl AttemptError {
    fn status(&self) -> Option<u16> {
        match self {
            AttemptError::Request(error) => error.status().map(|status| status.as_u16()),
            AttemptError::Status(status) => Some(*status),
            AttemptError::Json { status, .. } => Some(*status),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A blocking client for the BGPView API. Each lookup resolves the endpoint URL, retrieves it
/// with a fixed-delay retry loop, and normalizes the response.
///
/// The [Client::new] method attempts to source configuration values from environment variables
/// when set and uses default values when the environment variables are not set.
///
/// ```no_run
/// let client = bgpview::Client::new()?;
/// let upstreams = client.asn_upstreams(13335)?;
/// for line in upstreams.ipv4.lines() {
///     println!("{line}");
/// }
/// # Ok::<(), bgpview::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    retry_count: u32,
    retry_delay: u64,
    request_timeout: u64,
    retry_timeout: u64,
    accept_invalid_certs: bool,
    http: reqwest::blocking::Client,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Client {
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the base URL of the BGPView API.
    /// Defaults to `https://api.bgpview.io`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the number of attempts made to retrieve a URL. Defaults to 3.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Get the delay (in milliseconds) between attempts. Defaults to 1000.
    pub fn retry_delay(&self) -> u64 {
        self.retry_delay
    }

    /// Get the timeout (in milliseconds) for a single HTTP request.
    /// Defaults to 10000.
    pub fn request_timeout(&self) -> u64 {
        self.request_timeout
    }

    /// Get the maximum time (in milliseconds) spent retrying a URL.
    /// Defaults to 30000.
    pub fn retry_timeout(&self) -> u64 {
        self.retry_timeout
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /*-------------------------------------------------------------------------
      Lookups
    -------------------------------------------------------------------------*/

    /// Look up any endpoint kind and return the normalized record.
    pub fn lookup(&self, request: &LookupRequest) -> Result<NormalizedRecord> {
        let response = self.get(request)?;
        normalize(request, &response)
    }

    /// AS number details.
    pub fn asn<V: Display>(&self, as_number: V) -> Result<AsnRecord> {
        self.query(EndpointKind::Asn, as_number, |_, data| {
            AsnRecord::from_json(data)
        })
    }

    /// IPv4 and IPv6 prefixes announced by an AS number.
    pub fn asn_prefixes<V: Display>(&self, as_number: V) -> Result<AsnPrefixes> {
        self.query(EndpointKind::AsnPrefixes, as_number, AsnPrefixes::from_json)
    }

    pub fn asn_peers<V: Display>(&self, as_number: V) -> Result<AsnNeighbors> {
        self.query(EndpointKind::AsnPeers, as_number, |value, data| {
            AsnNeighbors::from_json(Relation::Peers, value, data)
        })
    }

    pub fn asn_upstreams<V: Display>(&self, as_number: V) -> Result<AsnNeighbors> {
        self.query(EndpointKind::AsnUpstreams, as_number, |value, data| {
            AsnNeighbors::from_json(Relation::Upstreams, value, data)
        })
    }

    pub fn asn_downstreams<V: Display>(&self, as_number: V) -> Result<AsnNeighbors> {
        self.query(EndpointKind::AsnDownstreams, as_number, |value, data| {
            AsnNeighbors::from_json(Relation::Downstreams, value, data)
        })
    }

    /// Internet Exchanges an AS number is connected to.
    pub fn asn_ixs<V: Display>(&self, as_number: V) -> Result<AsnIxs> {
        self.query(EndpointKind::AsnIxs, as_number, AsnIxs::from_json)
    }

    /// Prefix details; `prefix` is CIDR-format (`192.209.63.0/24`).
    pub fn prefix<V: Display>(&self, prefix: V) -> Result<PrefixRecord> {
        self.query(EndpointKind::Prefix, prefix, |_, data| {
            PrefixRecord::from_json(data)
        })
    }

    pub fn ip_address<V: Display>(&self, ip_address: V) -> Result<IpAddressRecord> {
        self.query(EndpointKind::IpAddress, ip_address, IpAddressRecord::from_json)
    }

    pub fn internet_exchange<V: Display>(&self, ix_id: V) -> Result<InternetExchangeRecord> {
        self.query(
            EndpointKind::InternetExchange,
            ix_id,
            InternetExchangeRecord::from_json,
        )
    }

    /// Full-text search across AS numbers, prefixes, and Internet Exchanges.
    pub fn search<V: Display>(&self, search_term: V) -> Result<SearchResults> {
        self.query(EndpointKind::Search, search_term, SearchResults::from_json)
    }

    /*-------------------------------------------------------------------------
      Fetch
    -------------------------------------------------------------------------*/

    /// Retrieve a concrete URL, retrying failed attempts.
    ///
    /// An attempt succeeds only with HTTP 200 and a parseable BGPView envelope. Attempts are
    /// separated by `retry_delay`, and a retry is only scheduled while it can start before
    /// `retry_timeout` has elapsed.
    pub fn fetch(&self, url: &str) -> FetchOutcome {
        let start_time = time::Instant::now();
        let max_elapsed_time = time::Duration::from_millis(self.retry_timeout);
        let delay = time::Duration::from_millis(self.retry_delay);

        let mut attempts: u32 = 0;
        let mut last_status: Option<u16> = None;
        loop {
            attempts += 1;
            info!("BGPView lookup; Attempt {}: GET {}", attempts, url);

            match self.get_json(url) {
                Ok(response) => {
                    info!("BGPView lookup; Attempt {}: Ok", attempts);
                    break FetchOutcome::Success(response);
                }
                Err(error) => {
                    log::error!("BGPView lookup; Attempt {}: FAILED: {}", attempts, error);
                    last_status = error.status().or(last_status);

                    if (attempts < self.retry_count)
                        && (start_time.elapsed() + delay < max_elapsed_time)
                    {
                        thread::sleep(delay);
                        continue;
                    } else {
                        break FetchOutcome::TransportFailure {
                            attempts,
                            last_status,
                        };
                    }
                }
            }
        }
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Resolve and retrieve the URL for a request.
    fn get(&self, request: &LookupRequest) -> Result<JsonResponse> {
        let url = request.kind().template(&self.url).resolve(request.value());
        debug!(
            "Resolved {} lookup `{}` to {}",
            request.kind(),
            request.value(),
            url
        );
        self.fetch(&url).into_result(&url)
    }

    /// Retrieve and shape one endpoint into its record type.
    fn query<V, T, F>(&self, kind: EndpointKind, value: V, shape: F) -> Result<T>
    where
        V: Display,
        F: FnOnce(&str, &Fields) -> Result<T>,
    {
        let request = LookupRequest::new(kind, value);
        let response = self.get(&request)?;
        shape(request.value(), &payload(&request, &response)?)
    }

    /// A single GET attempt.
    fn get_json(&self, url: &str) -> std::result::Result<JsonResponse, AttemptError> {
        let response = self.http.get(url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status(status.as_u16()));
        }

        let body = response.text()?;
        json::parse(&body).map_err(|source| AttemptError::Json {
            status: status.as_u16(),
            source,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::log_error;
    use crate::core::json::RemoteStatus;
    use env::VarError;
    use serde_json::json;
    use test_log::test;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /*-------------------------------------------------------------------------
      Mock BGPView Server
    -------------------------------------------------------------------------*/

    /// A wiremock server driven by its own tokio runtime, so the blocking
    /// client can be exercised from a plain (synchronous) test.
    struct MockBgpView {
        server: MockServer,
        runtime: tokio::runtime::Runtime,
    }

    impl MockBgpView {
        fn start() -> Self {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let server = runtime.block_on(MockServer::start());
            Self { server, runtime }
        }

        fn mount(&self, mock: Mock) {
            self.runtime.block_on(mock.mount(&self.server));
        }

        fn request_count(&self) -> usize {
            self.runtime
                .block_on(self.server.received_requests())
                .map_or(0, |requests| requests.len())
        }

        fn client(&self, retry_count: u32, retry_delay: u64) -> Client {
            ClientBuilder::default()
                .url(&self.server.uri())
                .retry_count(retry_count)
                .retry_delay(retry_delay)
                .request_timeout(2000)
                .build()
                .unwrap()
        }
    }

    fn ok_body(data: serde_json::Value) -> serde_json::Value {
        json!({
            "status": "ok",
            "status_message": "Query was successful",
            "data": data
        })
    }

    /*-------------------------------------------------------------------------
      Test Environment Variable Configuration
    -------------------------------------------------------------------------*/

    /// ENV_VAR: BGPVIEW_URL
    /// ENV_VAR: BGPVIEW_RETRY_COUNT
    /// ENV_VAR: BGPVIEW_RETRY_DELAY
    /// ENV_VAR: BGPVIEW_REQUEST_TIMEOUT
    /// ENV_VAR: BGPVIEW_RETRY_TIMEOUT
    /// ENV_VAR: BGPVIEW_ACCEPT_INVALID_CERTS
    #[test]
    fn test_environment_variable_configuration() {
        let test_env_vars = [
            ("BGPVIEW_URL", "https://my-bgpview.example.com/"),
            ("BGPVIEW_RETRY_COUNT", "5"),
            ("BGPVIEW_RETRY_DELAY", "250"),
            ("BGPVIEW_REQUEST_TIMEOUT", "3000"),
            ("BGPVIEW_RETRY_TIMEOUT", "9000"),
            ("BGPVIEW_ACCEPT_INVALID_CERTS", "true"),
        ];

        let default = ClientBuilder::default().build().unwrap();

        // Store environment variable values
        let stored_env_vars: Vec<(String, std::result::Result<String, VarError>)> = test_env_vars
            .iter()
            .map(|(env_var, _)| (env_var.to_string(), env::var(env_var)))
            .collect();

        // Unset all environment variables
        test_env_vars
            .iter()
            .for_each(|(env_var, _)| env::remove_var(env_var));

        // Test default cases
        let new = Client::new().unwrap();
        assert_eq!(new.url(), default.url());
        assert_eq!(new.retry_count(), default.retry_count());
        assert_eq!(new.retry_delay(), default.retry_delay());
        assert_eq!(new.request_timeout(), default.request_timeout());
        assert_eq!(new.retry_timeout(), default.retry_timeout());
        assert_eq!(new.accept_invalid_certs(), default.accept_invalid_certs());

        // Set all environment variables
        for (env_var, value) in test_env_vars.iter() {
            env::set_var(env_var, value);
        }

        // Test environment variable configuration
        let env_config = Client::new().unwrap();
        assert_eq!(env_config.url(), "https://my-bgpview.example.com");
        assert_eq!(env_config.retry_count(), 5);
        assert_eq!(env_config.retry_delay(), 250);
        assert_eq!(env_config.request_timeout(), 3000);
        assert_eq!(env_config.retry_timeout(), 9000);
        assert!(env_config.accept_invalid_certs());

        // Invalid values fall back to the defaults
        env::set_var("BGPVIEW_RETRY_COUNT", "three");
        assert_eq!(Client::new().unwrap().retry_count(), default.retry_count());

        // Reset environment variables
        for (env_var, value) in stored_env_vars {
            match value {
                Ok(value) => env::set_var(env_var, value),
                Err(VarError::NotPresent) => env::remove_var(env_var),
                Err(VarError::NotUnicode(value)) => env::set_var(env_var, value),
            }
        }
    }

    /*-------------------------------------------------------------------------
      Test Getter and Setter Methods
    -------------------------------------------------------------------------*/

    #[test]
    fn test_getter_and_setter_methods() {
        let client = ClientBuilder::default()
            .url("http://localhost:8080/")
            .retry_count(2)
            .retry_delay(100)
            .request_timeout(500)
            .retry_timeout(1000)
            .accept_invalid_certs(true)
            .build()
            .unwrap();

        assert_eq!(client.url(), "http://localhost:8080");
        assert_eq!(client.retry_count(), 2);
        assert_eq!(client.retry_delay(), 100);
        assert_eq!(client.request_timeout(), 500);
        assert_eq!(client.retry_timeout(), 1000);
        assert!(client.accept_invalid_certs());
    }

    /*-------------------------------------------------------------------------
      Test Fetch
    -------------------------------------------------------------------------*/

    #[test]
    fn test_fetch_success_after_one_request() {
        let mock = MockBgpView::start();
        mock.mount(
            Mock::given(method("GET"))
                .and(path("/asn/13335"))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({})))),
        );

        let client = mock.client(3, 10);
        let url = format!("{}/asn/13335", client.url());
        match client.fetch(&url) {
            FetchOutcome::Success(response) => {
                assert_eq!(response.status, RemoteStatus::Ok);
                assert_eq!(response.status_message, "Query was successful");
                assert_eq!(response.data, json!({}));
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_fetch_server_error_exhausts_retries() {
        let mock = MockBgpView::start();
        mock.mount(Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)));

        let client = mock.client(3, 100);
        let url = format!("{}/asn/1", client.url());

        let start_time = time::Instant::now();
        let outcome = client.fetch(&url);
        let elapsed = start_time.elapsed();

        assert_eq!(
            outcome,
            FetchOutcome::TransportFailure {
                attempts: 3,
                last_status: Some(500),
            }
        );
        assert_eq!(mock.request_count(), 3);
        assert!(elapsed >= time::Duration::from_millis(2 * 100));
    }

    #[test]
    fn test_fetch_retries_unparseable_body() {
        let mock = MockBgpView::start();
        mock.mount(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>Bad Gateway</html>"))
                .up_to_n_times(1),
        );
        mock.mount(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({})))),
        );

        let client = mock.client(3, 10);
        let outcome = client.fetch(&format!("{}/ix/363", client.url()));
        assert!(matches!(outcome, FetchOutcome::Success(_)));
        assert_eq!(mock.request_count(), 2);
    }

    #[test]
    fn test_fetch_retry_timeout_limits_attempts() {
        let mock = MockBgpView::start();
        mock.mount(Mock::given(method("GET")).respond_with(ResponseTemplate::new(503)));

        let client = ClientBuilder::default()
            .url(&mock.server.uri())
            .retry_count(10)
            .retry_delay(200)
            .retry_timeout(300)
            .build()
            .unwrap();

        let outcome = client.fetch(&format!("{}/asn/1", client.url()));
        assert!(matches!(
            outcome,
            FetchOutcome::TransportFailure { attempts, last_status: Some(503) } if attempts < 10
        ));
    }

    #[test]
    fn test_fetch_connection_refused() {
        let client = ClientBuilder::default()
            .url("http://127.0.0.1:1")
            .retry_count(2)
            .retry_delay(10)
            .request_timeout(500)
            .build()
            .unwrap();

        let result = client
            .fetch("http://127.0.0.1:1/asn/1")
            .into_result("http://127.0.0.1:1/asn/1");
        match result {
            Err(Error::TransportFailure {
                attempts,
                last_status,
                ..
            }) => {
                assert_eq!(attempts, 2);
                assert_eq!(last_status, None);
            }
            other => panic!("expected a transport failure, got {other:?}"),
        }
    }

    /*-------------------------------------------------------------------------
      Test Lookups
    -------------------------------------------------------------------------*/

    #[test]
    fn test_lookup_peers() {
        let mock = MockBgpView::start();
        mock.mount(
            Mock::given(method("GET"))
                .and(path("/asn/13335/peers"))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
                    "ipv4_peers": [
                        {"asn": 6939, "name": "HURRICANE", "description": "Hurricane Electric LLC", "country_code": "US"}
                    ],
                    "ipv6_peers": []
                })))),
        );

        let client = mock.client(1, 10);
        let record = client
            .lookup(&LookupRequest::new(EndpointKind::AsnPeers, 13335))
            .inspect_err(log_error)
            .unwrap();
        assert_eq!(
            record.lines(),
            vec![
                "AS Number 13335 IPv4 Peers .....",
                "<ASN: 6939 -- Name: Hurricane Electric LLC -- Location: US>",
                "AS Number 13335 has no IPv6 Peers",
            ]
        );

        let peers = client.asn_peers(13335).unwrap();
        assert_eq!(peers.ipv4.items.len(), 1);
    }

    #[test]
    fn test_search_sends_query_term() {
        let mock = MockBgpView::start();
        mock.mount(
            Mock::given(method("GET"))
                .and(path("/search"))
                .and(query_param("query_term", "digitalocean"))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({
                    "asns": [],
                    "ipv4_prefixes": [],
                    "ipv6_prefixes": [],
                    "internet_exchanges": []
                })))),
        );

        let results = mock.client(1, 10).search("digitalocean").unwrap();
        assert_eq!(results.title(), "BGPView Search: \"digitalocean\"");
        assert!(results.asns.is_empty());
    }

    #[test]
    fn test_remote_error_is_not_retried() {
        let mock = MockBgpView::start();
        mock.mount(
            Mock::given(method("GET"))
                .and(path("/ix/99999"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "status": "error",
                    "status_message": "Could not find IX"
                }))),
        );

        let result = mock.client(3, 10).internet_exchange(99999);
        match result {
            Err(Error::RemoteError {
                endpoint,
                value,
                message,
            }) => {
                assert_eq!(endpoint, EndpointKind::InternetExchange);
                assert_eq!(value, "99999");
                assert_eq!(message, "Could not find IX");
            }
            other => panic!("expected a remote error, got {other:?}"),
        }
        assert_eq!(mock.request_count(), 1);
    }
}
