use crate::core::errors::Result;
use crate::core::field::Field;
use crate::core::json::Fields;
use crate::core::section::{Section, TextBlock};
use ipnetwork::IpNetwork;
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Announced Prefix
-------------------------------------------------------------------------------------------------*/

/// A prefix announced by an AS.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AnnouncedPrefix {
    pub prefix: Field<IpNetwork>,
    pub name: Field<String>,
    pub country: Field<String>,
}

impl fmt::Display for AnnouncedPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {} ({})>", self.prefix, self.name, self.country)
    }
}

/*-------------------------------------------------------------------------------------------------
  ASN Prefixes
-------------------------------------------------------------------------------------------------*/

/// IPv4 and IPv6 prefixes from the `/asn/{as_number}/prefixes` endpoint, with the distinct
/// parent (covering) prefixes of each address family.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AsnPrefixes {
    pub ipv4_prefixes: Section<AnnouncedPrefix>,
    pub ipv4_parent_prefixes: Section<IpNetwork>,
    pub ipv6_prefixes: Section<AnnouncedPrefix>,
    pub ipv6_parent_prefixes: Section<IpNetwork>,
}

impl AsnPrefixes {
    pub(crate) fn from_json(as_number: &str, data: &Fields) -> Result<Self> {
        let (ipv4_prefixes, ipv4_parents) = announced_prefixes(data, "ipv4_prefixes")?;
        let (ipv6_prefixes, ipv6_parents) = announced_prefixes(data, "ipv6_prefixes")?;

        Ok(AsnPrefixes {
            ipv4_prefixes: section(as_number, "IPv4 Prefixes", ipv4_prefixes),
            ipv4_parent_prefixes: section(as_number, "IPv4 Parent Prefixes", ipv4_parents),
            ipv6_prefixes: section(as_number, "IPv6 Prefixes", ipv6_prefixes),
            ipv6_parent_prefixes: section(as_number, "IPv6 Parent Prefixes", ipv6_parents),
        })
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![
            self.ipv4_prefixes.block("IPv4 Prefixes"),
            self.ipv4_parent_prefixes.block("IPv4 Parent Prefixes"),
            self.ipv6_prefixes.block("IPv6 Prefixes"),
            self.ipv6_parent_prefixes.block("IPv6 Parent Prefixes"),
        ]
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn announced_prefixes(data: &Fields, key: &str) -> Result<(Vec<AnnouncedPrefix>, Vec<IpNetwork>)> {
    let mut prefixes = Vec::new();
    let mut parents: Vec<IpNetwork> = Vec::new();

    for item in data.array(key)? {
        prefixes.push(AnnouncedPrefix {
            prefix: item.parsed("prefix", "a prefix")?,
            name: item.text("description")?,
            country: item.text("country_code")?,
        });

        // Parents repeat across sibling prefixes; keep the first occurrence only
        if let Field::Value(parent) = item.object("parent")?.parsed("prefix", "a prefix")? {
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
    }

    Ok((prefixes, parents))
}

fn section<T: fmt::Display>(as_number: &str, label: &str, items: Vec<T>) -> Section<T> {
    Section::new(
        format!("AS Number {as_number} {label} ....."),
        format!("AS Number {as_number} has no {label}"),
        items,
    )
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
