use crate::core::asn_neighbors::AsnSummary;
use crate::core::errors::Result;
use crate::core::field::Field;
use crate::core::json::Fields;
use crate::core::section::{Section, TextBlock};
use ipnetwork::IpNetwork;
use log::trace;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  IP Address Record
-------------------------------------------------------------------------------------------------*/

/// The covering prefix and origin AS numbers of an IP address, from the `/ip/{ip_address}`
/// endpoint.
///
/// The most specific covering prefix supplies the prefix, name, and location. Origins are
/// collected from every covering prefix with duplicates removed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IpAddressRecord {
    pub ip: Field<IpAddr>,
    pub prefix: Field<IpNetwork>,
    pub name: Field<String>,
    pub location: Field<String>,
    pub origins: Section<AsnSummary>,
}

struct CoveringPrefix {
    prefix: Field<IpNetwork>,
    name: Field<String>,
    location: Field<String>,
    origin: AsnSummary,
}

impl IpAddressRecord {
    pub(crate) fn from_json(ip_address: &str, data: &Fields) -> Result<Self> {
        let ip = data.parsed("ip", "an IP address")?;

        let covering = data
            .array("prefixes")?
            .iter()
            .map(|item| -> Result<CoveringPrefix> {
                Ok(CoveringPrefix {
                    prefix: item.parsed("prefix", "a prefix")?,
                    name: item.text("description")?,
                    location: item.text("country_code")?,
                    origin: AsnSummary::from_json(&item.object("asn")?)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut origins: Vec<AsnSummary> = Vec::new();
        for entry in &covering {
            if entry.origin.asn.is_value() && !origins.contains(&entry.origin) {
                origins.push(entry.origin.clone());
            }
        }

        // Ties keep the first prefix listed
        let most_specific = covering.iter().reduce(|best, entry| {
            if mask_length(&entry.prefix) > mask_length(&best.prefix) {
                entry
            } else {
                best
            }
        });
        trace!(
            "{ip_address}: {} covering prefix(es), most specific: {:?}",
            covering.len(),
            most_specific.map(|entry| entry.prefix.to_string())
        );

        let (prefix, name, location) = match most_specific {
            Some(entry) => (
                entry.prefix.clone(),
                entry.name.clone(),
                entry.location.clone(),
            ),
            None => (Field::Missing, Field::Missing, Field::Missing),
        };

        Ok(IpAddressRecord {
            ip,
            prefix,
            name,
            location,
            origins: Section::new(
                format!("IP Address {ip_address} Origin AS Numbers ....."),
                format!("IP Address {ip_address} has no origin AS Numbers"),
                origins,
            ),
        })
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![
            TextBlock::single(self.ip.to_string(), self.to_string()),
            self.origins.block("Origin AS Numbers"),
        ]
    }
}

impl fmt::Display for IpAddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<IP: {} -- Prefix: {} -- Name: {} -- Location: {}>",
            self.ip, self.prefix, self.name, self.location
        )
    }
}

fn mask_length(prefix: &Field<IpNetwork>) -> Option<u8> {
    prefix.value().map(IpNetwork::prefix)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
