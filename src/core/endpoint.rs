use crate::core::errors::{Error, Result};
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Placeholder Tokens
-------------------------------------------------------------------------------------------------*/

/// Placeholder tokens recognized in endpoint URL templates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placeholder {
    AsNumber,
    IpCidr,
    IpAddress,
    IxId,
    SearchTerm,
}

impl Placeholder {
    /// All placeholders in match order. `ip_address/cidr` must be tried before `ip_address`.
    pub const ALL: [Placeholder; 5] = [
        Placeholder::AsNumber,
        Placeholder::IpCidr,
        Placeholder::IpAddress,
        Placeholder::IxId,
        Placeholder::SearchTerm,
    ];

    /// The literal token replaced in a template.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::AsNumber => "as_number",
            Placeholder::IpCidr => "ip_address/cidr",
            Placeholder::IpAddress => "ip_address",
            Placeholder::IxId => "ix_id",
            Placeholder::SearchTerm => "search_term",
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Endpoint Template
-------------------------------------------------------------------------------------------------*/

/// An endpoint URL template: literal text plus one [Placeholder] token.
///
/// ```
/// let template = bgpview::EndpointTemplate::new("https://api.bgpview.io/asn/as_number/peers")?;
/// assert_eq!(template.resolve(13335), "https://api.bgpview.io/asn/13335/peers");
/// # Ok::<(), bgpview::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointTemplate {
    template: String,
    placeholder: Placeholder,

    // Substitution starts here; text before it (a base URL) is never rewritten.
    path_start: usize,
}

impl EndpointTemplate {
    /// Create a template, failing with [Error::InvalidTemplate] when it contains none of the
    /// recognized placeholder tokens.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        match Placeholder::ALL
            .into_iter()
            .find(|placeholder| template.contains(placeholder.token()))
        {
            Some(placeholder) => Ok(Self {
                template,
                placeholder,
                path_start: 0,
            }),
            None => Err(Error::InvalidTemplate { template }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// Substitute `value` for the placeholder token. The value is inserted verbatim; it is
    /// neither escaped nor validated.
    pub fn resolve<V: fmt::Display>(&self, value: V) -> String {
        let (base, path) = self.template.split_at(self.path_start);
        let path = path.replacen(self.placeholder.token(), &value.to_string(), 1);
        format!("{base}{path}")
    }
}

/// Build a concrete URL from a template string and a substitution value.
pub fn resolve<V: fmt::Display>(template: &str, value: V) -> Result<String> {
    EndpointTemplate::new(template).map(|template| template.resolve(value))
}

/*-------------------------------------------------------------------------------------------------
  Endpoint Kind
-------------------------------------------------------------------------------------------------*/

/// The BGPView API endpoints supported by the client.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointKind {
    Asn,
    AsnPrefixes,
    AsnPeers,
    AsnUpstreams,
    AsnDownstreams,
    AsnIxs,
    Prefix,
    IpAddress,
    InternetExchange,
    Search,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 10] = [
        EndpointKind::Asn,
        EndpointKind::AsnPrefixes,
        EndpointKind::AsnPeers,
        EndpointKind::AsnUpstreams,
        EndpointKind::AsnDownstreams,
        EndpointKind::AsnIxs,
        EndpointKind::Prefix,
        EndpointKind::IpAddress,
        EndpointKind::InternetExchange,
        EndpointKind::Search,
    ];

    /// The endpoint path template, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            EndpointKind::Asn => "/asn/as_number",
            EndpointKind::AsnPrefixes => "/asn/as_number/prefixes",
            EndpointKind::AsnPeers => "/asn/as_number/peers",
            EndpointKind::AsnUpstreams => "/asn/as_number/upstreams",
            EndpointKind::AsnDownstreams => "/asn/as_number/downstreams",
            EndpointKind::AsnIxs => "/asn/as_number/ixs",
            EndpointKind::Prefix => "/prefix/ip_address/cidr",
            EndpointKind::IpAddress => "/ip/ip_address",
            EndpointKind::InternetExchange => "/ix/ix_id",
            EndpointKind::Search => "/search?query_term=search_term",
        }
    }

    pub fn placeholder(&self) -> Placeholder {
        match self {
            EndpointKind::Asn
            | EndpointKind::AsnPrefixes
            | EndpointKind::AsnPeers
            | EndpointKind::AsnUpstreams
            | EndpointKind::AsnDownstreams
            | EndpointKind::AsnIxs => Placeholder::AsNumber,
            EndpointKind::Prefix => Placeholder::IpCidr,
            EndpointKind::IpAddress => Placeholder::IpAddress,
            EndpointKind::InternetExchange => Placeholder::IxId,
            EndpointKind::Search => Placeholder::SearchTerm,
        }
    }

    /// The endpoint template rooted at `base_url`. Only the endpoint path is substituted, even
    /// when `base_url` happens to contain a placeholder token.
    pub fn template(&self, base_url: &str) -> EndpointTemplate {
        let base_url = base_url.trim_end_matches('/');
        EndpointTemplate {
            template: format!("{}{}", base_url, self.path()),
            placeholder: self.placeholder(),
            path_start: base_url.len(),
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EndpointKind::Asn => "ASN",
            EndpointKind::AsnPrefixes => "ASN prefixes",
            EndpointKind::AsnPeers => "ASN peers",
            EndpointKind::AsnUpstreams => "ASN upstreams",
            EndpointKind::AsnDownstreams => "ASN downstreams",
            EndpointKind::AsnIxs => "ASN IXs",
            EndpointKind::Prefix => "prefix",
            EndpointKind::IpAddress => "IP address",
            EndpointKind::InternetExchange => "Internet Exchange",
            EndpointKind::Search => "search",
        };
        f.write_str(name)
    }
}

/*-------------------------------------------------------------------------------------------------
  Lookup Request
-------------------------------------------------------------------------------------------------*/

/// A single lookup: an endpoint and the value substituted into its template.
///
/// The value is kept in its string form and is not validated; a malformed AS number or prefix
/// is sent as-is and reported back by the remote service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LookupRequest {
    kind: EndpointKind,
    value: String,
}

impl LookupRequest {
    pub fn new<V: fmt::Display>(kind: EndpointKind, value: V) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://api.bgpview.io";

    #[test]
    fn test_resolve_every_endpoint_kind() {
        let cases = [
            (EndpointKind::Asn, "13335", "https://api.bgpview.io/asn/13335"),
            (
                EndpointKind::AsnPrefixes,
                "13335",
                "https://api.bgpview.io/asn/13335/prefixes",
            ),
            (
                EndpointKind::AsnPeers,
                "13335",
                "https://api.bgpview.io/asn/13335/peers",
            ),
            (
                EndpointKind::AsnUpstreams,
                "13335",
                "https://api.bgpview.io/asn/13335/upstreams",
            ),
            (
                EndpointKind::AsnDownstreams,
                "13335",
                "https://api.bgpview.io/asn/13335/downstreams",
            ),
            (
                EndpointKind::AsnIxs,
                "13335",
                "https://api.bgpview.io/asn/13335/ixs",
            ),
            (
                EndpointKind::Prefix,
                "192.209.63.0/24",
                "https://api.bgpview.io/prefix/192.209.63.0/24",
            ),
            (
                EndpointKind::IpAddress,
                "193.189.100.205",
                "https://api.bgpview.io/ip/193.189.100.205",
            ),
            (
                EndpointKind::InternetExchange,
                "363",
                "https://api.bgpview.io/ix/363",
            ),
            (
                EndpointKind::Search,
                "digitalocean",
                "https://api.bgpview.io/search?query_term=digitalocean",
            ),
        ];

        for (kind, value, expected) in cases {
            assert_eq!(kind.template(BASE_URL).resolve(value), expected);
        }
    }

    #[test]
    fn test_every_kind_template_has_its_placeholder() {
        for kind in EndpointKind::ALL {
            let template = EndpointTemplate::new(kind.template(BASE_URL).as_str()).unwrap();
            assert_eq!(template.placeholder(), kind.placeholder());
        }
    }

    #[test]
    fn test_resolve_substitutes_exactly_once() {
        let url = resolve("http://example.com/as_number/as_number", 7).unwrap();
        assert_eq!(url, "http://example.com/7/as_number");
    }

    #[test]
    fn test_resolve_prefers_cidr_token() {
        let template = EndpointTemplate::new("http://example.com/prefix/ip_address/cidr").unwrap();
        assert_eq!(template.placeholder(), Placeholder::IpCidr);
        assert_eq!(
            template.resolve("2001:1508::/32"),
            "http://example.com/prefix/2001:1508::/32"
        );
    }

    #[test]
    fn test_resolve_passes_values_through_verbatim() {
        let url = resolve("http://example.com/asn/as_number", "dfsd").unwrap();
        assert_eq!(url, "http://example.com/asn/dfsd");

        let url = resolve("http://example.com/search?query_term=search_term", "a b&c").unwrap();
        assert_eq!(url, "http://example.com/search?query_term=a b&c");
    }

    #[test]
    fn test_invalid_template() {
        let result = resolve("http://example.com/asn/{asn}", 1);
        assert!(matches!(
            result,
            Err(Error::InvalidTemplate { template }) if template == "http://example.com/asn/{asn}"
        ));
    }

    #[test]
    fn test_base_url_tokens_are_not_substituted() {
        let template = EndpointKind::IpAddress.template("http://ip_address.internal/");
        assert_eq!(
            template.resolve("1.1.1.1"),
            "http://ip_address.internal/ip/1.1.1.1"
        );

        let template = EndpointKind::AsnPeers.template("http://as_number.example.com");
        assert_eq!(
            template.resolve(13335),
            "http://as_number.example.com/asn/13335/peers"
        );
    }

    #[test]
    fn test_template_trims_trailing_slash_from_base_url() {
        let template = EndpointKind::Asn.template("http://127.0.0.1:8080/");
        assert_eq!(template.as_str(), "http://127.0.0.1:8080/asn/as_number");
    }

    #[test]
    fn test_lookup_request_keeps_value_as_text() {
        let request = LookupRequest::new(EndpointKind::InternetExchange, 42);
        assert_eq!(request.kind(), EndpointKind::InternetExchange);
        assert_eq!(request.value(), "42");
    }
}
