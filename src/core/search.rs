use crate::core::errors::Result;
use crate::core::field::{self, Field};
use crate::core::json::Fields;
use crate::core::section::{Section, TextBlock};
use ipnetwork::IpNetwork;
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Search Matches
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  AS Number Match
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchAsn {
    pub asn: Field<u32>,
    pub name: Field<String>,
    pub description: Field<String>,
    pub country: Field<String>,
}

impl SearchAsn {
    fn from_json(item: &Fields) -> Result<Self> {
        Ok(SearchAsn {
            asn: item.parsed("asn", "an AS number")?,
            name: item.text("name")?,
            description: item.text("description")?,
            country: item.text("country_code")?,
        })
    }
}

impl fmt::Display for SearchAsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ASN: {} -- Name: {} -- Description: {} -- Location: {}>",
            self.asn, self.name, self.description, self.country
        )
    }
}

/*--------------------------------------------------------------------------------------
  Prefix Match
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchPrefix {
    pub prefix: Field<IpNetwork>,
    pub name: Field<String>,
    pub country: Field<String>,
}

impl SearchPrefix {
    fn from_json(item: &Fields) -> Result<Self> {
        Ok(SearchPrefix {
            prefix: item.parsed("prefix", "a prefix")?,
            name: item.text("description")?,
            country: item.text("country_code")?,
        })
    }
}

impl fmt::Display for SearchPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.prefix.value() {
            Some(IpNetwork::V6(_)) => "IPv6",
            _ => "IPv4",
        };
        write!(
            f,
            "<{} Prefix: {} -- Name: {} -- Location: {}>",
            family, self.prefix, self.name, self.country
        )
    }
}

/*--------------------------------------------------------------------------------------
  Internet Exchange Match
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchIx {
    pub ix_id: Field<u32>,
    pub name: Field<String>,
    pub city: Field<String>,
    pub country: Field<String>,
}

impl SearchIx {
    fn from_json(item: &Fields) -> Result<Self> {
        Ok(SearchIx {
            ix_id: item.parsed("ix_id", "an IX id")?,
            name: item.text("name_full")?,
            city: item.text("city")?,
            country: item.text("country_code")?,
        })
    }
}

impl fmt::Display for SearchIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Internet Exchange ID: {} -- Name: {} -- Location: {}>",
            self.ix_id,
            self.name,
            field::location(&self.city, &self.country)
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  Search Results
-------------------------------------------------------------------------------------------------*/

/// Full-text search results from the `/search` endpoint. Each category is reported
/// independently; an empty category renders its own not-found message.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub asns: Section<SearchAsn>,
    pub ipv4_prefixes: Section<SearchPrefix>,
    pub ipv6_prefixes: Section<SearchPrefix>,
    pub internet_exchanges: Section<SearchIx>,
}

impl SearchResults {
    pub(crate) fn from_json(query: &str, data: &Fields) -> Result<Self> {
        Ok(SearchResults {
            query: query.to_string(),
            asns: Section::new(
                "Autonomous System Numbers .....",
                "No Autonomous System Numbers Found.",
                collect_matches(data, "asns", SearchAsn::from_json)?,
            ),
            ipv4_prefixes: Section::new(
                "IPv4 Prefixes .....",
                "No IPv4 Information Found.",
                collect_matches(data, "ipv4_prefixes", SearchPrefix::from_json)?,
            ),
            ipv6_prefixes: Section::new(
                "IPv6 Prefixes .....",
                "No IPv6 Information Found.",
                collect_matches(data, "ipv6_prefixes", SearchPrefix::from_json)?,
            ),
            internet_exchanges: Section::new(
                "Internet Exchanges .....",
                "No Internet Exchange Information Found.",
                collect_matches(data, "internet_exchanges", SearchIx::from_json)?,
            ),
        })
    }

    pub fn title(&self) -> String {
        format!("BGPView Search: \"{}\"", self.query)
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![
            TextBlock::single("Search", self.title()),
            self.asns.block("AS Numbers"),
            self.ipv4_prefixes.block("IPv4 Prefixes"),
            self.ipv6_prefixes.block("IPv6 Prefixes"),
            self.internet_exchanges.block("Internet Exchanges"),
        ]
    }
}

fn collect_matches<T>(
    data: &Fields,
    key: &str,
    parse: fn(&Fields) -> Result<T>,
) -> Result<Vec<T>> {
    data.array(key)?.iter().map(parse).collect()
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
