use crate::core::asn::AsnRecord;
use crate::core::asn_ixs::AsnIxs;
use crate::core::asn_neighbors::{AsnNeighbors, Relation};
use crate::core::asn_prefixes::AsnPrefixes;
use crate::core::endpoint::{EndpointKind, LookupRequest};
use crate::core::errors::{Error, Result};
use crate::core::internet_exchange::InternetExchangeRecord;
use crate::core::ip_address::IpAddressRecord;
use crate::core::json::{Fields, JsonResponse, RemoteStatus};
use crate::core::prefix::PrefixRecord;
use crate::core::search::SearchResults;
use crate::core::section::TextBlock;
use log::debug;
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Normalized Record
-------------------------------------------------------------------------------------------------*/

/// A BGPView response flattened into typed fields and human-readable lines. One variant per
/// [EndpointKind].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "endpoint", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalizedRecord {
    Asn(AsnRecord),
    AsnPrefixes(AsnPrefixes),
    AsnPeers(AsnNeighbors),
    AsnUpstreams(AsnNeighbors),
    AsnDownstreams(AsnNeighbors),
    AsnIxs(AsnIxs),
    Prefix(PrefixRecord),
    IpAddress(IpAddressRecord),
    InternetExchange(InternetExchangeRecord),
    Search(SearchResults),
}

impl NormalizedRecord {
    pub fn kind(&self) -> EndpointKind {
        match self {
            NormalizedRecord::Asn(_) => EndpointKind::Asn,
            NormalizedRecord::AsnPrefixes(_) => EndpointKind::AsnPrefixes,
            NormalizedRecord::AsnPeers(_) => EndpointKind::AsnPeers,
            NormalizedRecord::AsnUpstreams(_) => EndpointKind::AsnUpstreams,
            NormalizedRecord::AsnDownstreams(_) => EndpointKind::AsnDownstreams,
            NormalizedRecord::AsnIxs(_) => EndpointKind::AsnIxs,
            NormalizedRecord::Prefix(_) => EndpointKind::Prefix,
            NormalizedRecord::IpAddress(_) => EndpointKind::IpAddress,
            NormalizedRecord::InternetExchange(_) => EndpointKind::InternetExchange,
            NormalizedRecord::Search(_) => EndpointKind::Search,
        }
    }

    /// The record rendered as titled blocks of lines, in display order.
    pub fn blocks(&self) -> Vec<TextBlock> {
        match self {
            NormalizedRecord::Asn(record) => record.blocks(),
            NormalizedRecord::AsnPrefixes(record) => record.blocks(),
            NormalizedRecord::AsnPeers(record)
            | NormalizedRecord::AsnUpstreams(record)
            | NormalizedRecord::AsnDownstreams(record) => record.blocks(),
            NormalizedRecord::AsnIxs(record) => record.blocks(),
            NormalizedRecord::Prefix(record) => record.blocks(),
            NormalizedRecord::IpAddress(record) => record.blocks(),
            NormalizedRecord::InternetExchange(record) => record.blocks(),
            NormalizedRecord::Search(record) => record.blocks(),
        }
    }

    /// Every rendered line of the record; never empty.
    pub fn lines(&self) -> Vec<String> {
        self.blocks()
            .into_iter()
            .flat_map(|block| block.lines)
            .collect()
    }
}

/*-------------------------------------------------------------------------------------------------
  Normalize
-------------------------------------------------------------------------------------------------*/

/// Flatten a BGPView response for `request` into a [NormalizedRecord].
///
/// A response with `"status": "error"` becomes [Error::RemoteError] carrying the remote
/// `status_message`; no fields are read from it. An `"ok"` response without `data` is a
/// [Error::SchemaMismatch].
pub fn normalize(request: &LookupRequest, response: &JsonResponse) -> Result<NormalizedRecord> {
    let data = payload(request, response)?;
    debug!("Normalizing {} payload for `{}`", request.kind(), request.value());
    shape(request, &data)
}

pub(crate) fn payload<'r>(
    request: &LookupRequest,
    response: &'r JsonResponse,
) -> Result<Fields<'r>> {
    match response.status {
        RemoteStatus::Ok if response.data.is_null() => Err(Error::SchemaMismatch {
            endpoint: request.kind(),
            field: "data".to_string(),
            reason: "is missing".to_string(),
        }),
        RemoteStatus::Ok => Ok(Fields::data(request.kind(), &response.data)),
        RemoteStatus::Error => Err(Error::RemoteError {
            endpoint: request.kind(),
            value: request.value().to_string(),
            message: response.status_message.clone(),
        }),
    }
}

fn shape(request: &LookupRequest, data: &Fields) -> Result<NormalizedRecord> {
    let value = request.value();
    Ok(match request.kind() {
        EndpointKind::Asn => NormalizedRecord::Asn(AsnRecord::from_json(data)?),
        EndpointKind::AsnPrefixes => {
            NormalizedRecord::AsnPrefixes(AsnPrefixes::from_json(value, data)?)
        }
        EndpointKind::AsnPeers => {
            NormalizedRecord::AsnPeers(AsnNeighbors::from_json(Relation::Peers, value, data)?)
        }
        EndpointKind::AsnUpstreams => NormalizedRecord::AsnUpstreams(AsnNeighbors::from_json(
            Relation::Upstreams,
            value,
            data,
        )?),
        EndpointKind::AsnDownstreams => NormalizedRecord::AsnDownstreams(
            AsnNeighbors::from_json(Relation::Downstreams, value, data)?,
        ),
        EndpointKind::AsnIxs => NormalizedRecord::AsnIxs(AsnIxs::from_json(value, data)?),
        EndpointKind::Prefix => NormalizedRecord::Prefix(PrefixRecord::from_json(data)?),
        EndpointKind::IpAddress => {
            NormalizedRecord::IpAddress(IpAddressRecord::from_json(value, data)?)
        }
        EndpointKind::InternetExchange => {
            NormalizedRecord::InternetExchange(InternetExchangeRecord::from_json(value, data)?)
        }
        EndpointKind::Search => NormalizedRecord::Search(SearchResults::from_json(value, data)?),
    })
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asn::tests::registered_asn_json;
    use crate::core::errors::log_error;
    use crate::core::field::MISSING;
    use serde_json::{json, Value};
    use test_log::test;

    fn ok(data: Value) -> JsonResponse {
        JsonResponse {
            status: RemoteStatus::Ok,
            status_message: "Query was successful".to_string(),
            data,
        }
    }

    #[test]
    fn test_remote_error() {
        let request = LookupRequest::new(EndpointKind::Prefix, "192.209.63.0/99");
        let response = JsonResponse {
            status: RemoteStatus::Error,
            status_message: "Malformed input".to_string(),
            data: Value::Null,
        };

        match normalize(&request, &response) {
            Err(Error::RemoteError {
                endpoint,
                value,
                message,
            }) => {
                assert_eq!(endpoint, EndpointKind::Prefix);
                assert_eq!(value, "192.209.63.0/99");
                assert_eq!(message, "Malformed input");
            }
            other => panic!("expected a remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_response_without_data() {
        let response = crate::core::json::parse(
            r#"{"status": "ok", "status_message": "Query was successful"}"#,
        )
        .unwrap();

        for (kind, value) in [
            (EndpointKind::Asn, "1"),
            (EndpointKind::Search, "digitalocean"),
            (EndpointKind::AsnIxs, "1"),
        ] {
            let request = LookupRequest::new(kind, value);
            match normalize(&request, &response) {
                Err(Error::SchemaMismatch {
                    endpoint,
                    field,
                    reason,
                }) => {
                    assert_eq!(endpoint, kind);
                    assert_eq!(field, "data");
                    assert_eq!(reason, "is missing");
                }
                other => panic!("expected a schema mismatch, got {other:?}"),
            }
        }

        let request = LookupRequest::new(EndpointKind::Asn, 1);
        assert!(matches!(
            normalize(&request, &ok(Value::Null)),
            Err(Error::SchemaMismatch { field, .. }) if field == "data"
        ));
    }

    #[test]
    fn test_normalize_asn() {
        let request = LookupRequest::new(EndpointKind::Asn, 1);
        let record = normalize(&request, &ok(registered_asn_json()))
            .inspect_err(log_error)
            .unwrap();
        assert_eq!(record.kind(), EndpointKind::Asn);
        assert_eq!(record.lines()[0], "ASN: 1");
        assert!(record.lines().iter().all(|line| !line.contains(MISSING)));
    }

    #[test]
    fn test_normalize_dispatches_neighbor_relations() {
        let cases = [
            (EndpointKind::AsnPeers, "ipv4_peers", "ipv6_peers", "Peers"),
            (
                EndpointKind::AsnUpstreams,
                "ipv4_upstreams",
                "ipv6_upstreams",
                "Upstreams",
            ),
            (
                EndpointKind::AsnDownstreams,
                "ipv4_downstreams",
                "ipv6_downstreams",
                "Downstreams",
            ),
        ];

        for (kind, ipv4, ipv6, label) in cases {
            let mut data = serde_json::Map::new();
            data.insert(ipv4.to_string(), json!([]));
            data.insert(ipv6.to_string(), json!([]));

            let request = LookupRequest::new(kind, 64512);
            let record = normalize(&request, &ok(Value::Object(data))).unwrap();
            assert_eq!(record.kind(), kind);
            assert_eq!(
                record.lines(),
                vec![
                    format!("AS Number 64512 has no IPv4 {label}"),
                    format!("AS Number 64512 has no IPv6 {label}"),
                ]
            );
        }
    }

    #[test]
    fn test_schema_mismatch_names_endpoint() {
        let request = LookupRequest::new(EndpointKind::AsnPrefixes, 1);
        let result = normalize(&request, &ok(json!({"ipv4_prefixes": []})));
        assert!(matches!(
            result,
            Err(Error::SchemaMismatch { endpoint: EndpointKind::AsnPrefixes, field, .. })
                if field == "data.ipv6_prefixes"
        ));
    }

    #[test]
    fn test_serialize_record_with_endpoint_tag() {
        let request = LookupRequest::new(EndpointKind::AsnIxs, 13335);
        let record = normalize(&request, &ok(json!([]))).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["endpoint"], "ASN_IXS");
        assert_eq!(json["memberships"]["items"], json!([]));
    }

    #[test]
    fn test_every_record_has_lines() {
        let request = LookupRequest::new(EndpointKind::Search, "nothing");
        let record = normalize(
            &request,
            &ok(json!({
                "asns": [],
                "ipv4_prefixes": [],
                "ipv6_prefixes": [],
                "internet_exchanges": []
            })),
        )
        .unwrap();
        assert_eq!(record.lines().len(), 5);
    }
}
