use crate::core::errors::Result;
use crate::core::field::Field;
use crate::core::json::Fields;
use crate::core::section::{Section, TextBlock};
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  ASN Summary
-------------------------------------------------------------------------------------------------*/

/// An AS number with its description and country, as embedded in many BGPView payloads.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AsnSummary {
    pub asn: Field<u32>,
    pub name: Field<String>,
    pub country: Field<String>,
}

impl AsnSummary {
    pub(crate) fn from_json(item: &Fields) -> Result<Self> {
        Ok(AsnSummary {
            asn: item.parsed("asn", "an AS number")?,
            name: item.text("description")?,
            country: item.text("country_code")?,
        })
    }
}

impl fmt::Display for AsnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ASN: {} -- Name: {} -- Location: {}>",
            self.asn, self.name, self.country
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  Relation
-------------------------------------------------------------------------------------------------*/

/// The BGP relationship reported by a neighbor endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Peers,
    Upstreams,
    Downstreams,
}

impl Relation {
    /// Payload key for an address family (`ipv4` or `ipv6`), e.g. `ipv4_upstreams`.
    fn key(&self, family: &str) -> String {
        let suffix = match self {
            Relation::Peers => "peers",
            Relation::Upstreams => "upstreams",
            Relation::Downstreams => "downstreams",
        };
        format!("{family}_{suffix}")
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Peers => "Peers",
            Relation::Upstreams => "Upstreams",
            Relation::Downstreams => "Downstreams",
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  ASN Neighbors
-------------------------------------------------------------------------------------------------*/

/// IPv4 and IPv6 neighbors from the `/asn/{as_number}/peers`, `/upstreams`, and `/downstreams`
/// endpoints.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AsnNeighbors {
    pub relation: Relation,
    pub ipv4: Section<AsnSummary>,
    pub ipv6: Section<AsnSummary>,
}

impl AsnNeighbors {
    pub(crate) fn from_json(relation: Relation, as_number: &str, data: &Fields) -> Result<Self> {
        let neighbors = |family: &str, label: &str| -> Result<Section<AsnSummary>> {
            let items = data
                .array(&relation.key(family))?
                .iter()
                .map(AsnSummary::from_json)
                .collect::<Result<Vec<_>>>()?;

            Ok(Section::new(
                format!("AS Number {as_number} {label} {relation} ....."),
                format!("AS Number {as_number} has no {label} {relation}"),
                items,
            ))
        };

        Ok(AsnNeighbors {
            relation,
            ipv4: neighbors("ipv4", "IPv4")?,
            ipv6: neighbors("ipv6", "IPv6")?,
        })
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![
            self.ipv4.block(format!("IPv4 {}", self.relation)),
            self.ipv6.block(format!("IPv6 {}", self.relation)),
        ]
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
