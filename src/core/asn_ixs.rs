use crate::core::errors::Result;
use crate::core::field::{self, Field};
use crate::core::json::Fields;
use crate::core::section::{Section, TextBlock};
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  IX Membership
-------------------------------------------------------------------------------------------------*/

/// An AS number's presence at an Internet Exchange.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IxMembership {
    pub ix_id: Field<u32>,
    pub name: Field<String>,
    pub name_full: Field<String>,
    pub city: Field<String>,
    pub country: Field<String>,
    pub ipv4_address: Field<String>,
    pub ipv6_address: Field<String>,
    pub speed: Field<u64>,
}

impl IxMembership {
    pub(crate) fn from_json(item: &Fields) -> Result<Self> {
        Ok(IxMembership {
            ix_id: item.parsed("ix_id", "an IX id")?,
            name: item.text("name")?,
            name_full: item.text("name_full")?,
            city: item.text("city")?,
            country: item.text("country_code")?,
            ipv4_address: item.text("ipv4_address")?,
            ipv6_address: item.text("ipv6_address")?,
            speed: port_speed(item)?,
        })
    }

    /// `Full Name (SHORT)`, or just the full name when the short name is absent.
    pub fn display_name(&self) -> String {
        match self.name.value() {
            Some(name) => format!("{} ({})", self.name_full, name),
            None => self.name_full.to_string(),
        }
    }
}

impl fmt::Display for IxMembership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<IX ID: {} -- Name: {} -- Location: {} -- IPv4 Address: {} -- IPv6 Address: {} -- Speed: {}>",
            self.ix_id,
            self.display_name(),
            field::location(&self.city, &self.country),
            self.ipv4_address,
            self.ipv6_address,
            self.speed,
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  ASN IXs
-------------------------------------------------------------------------------------------------*/

/// Internet Exchange memberships from the `/asn/{as_number}/ixs` endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AsnIxs {
    pub memberships: Section<IxMembership>,
}

impl AsnIxs {
    pub(crate) fn from_json(as_number: &str, data: &Fields) -> Result<Self> {
        let memberships = data
            .items()?
            .iter()
            .map(IxMembership::from_json)
            .collect::<Result<Vec<_>>>()?;

        Ok(AsnIxs {
            memberships: Section::new(
                format!("AS Number {as_number} Internet Exchange Information ....."),
                format!("AS Number {as_number} has no Internet Exchange data"),
                memberships,
            ),
        })
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![self.memberships.block("Internet Exchanges")]
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Port speed in Mbps; BGPView reports `0` when the speed is unknown.
pub(crate) fn port_speed(item: &Fields) -> Result<Field<u64>> {
    Ok(match item.parsed("speed", "a port speed")? {
        Field::Value(0) => Field::Missing,
        speed => speed,
    })
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::endpoint::EndpointKind;
    use serde_json::{json, Value};

    fn ixs_json() -> Value {
        json!([
            {
                "ix_id": 363,
                "name": "DE-CIX Frankfurt",
                "name_full": "DE-CIX Frankfurt",
                "country_code": "DE",
                "city": "Frankfurt",
                "ipv4_address": "80.81.193.47",
                "ipv6_address": "2001:7f8::1:0:8a5b:1",
                "speed": 100000
            },
            {
                "ix_id": 18,
                "name": "AMS-IX",
                "name_full": "Amsterdam Internet Exchange",
                "country_code": "NL",
                "city": null,
                "ipv4_address": "80.249.211.140",
                "ipv6_address": null,
                "speed": 0
            }
        ])
    }

    fn record(data: &Value) -> AsnIxs {
        AsnIxs::from_json("13335", &Fields::data(EndpointKind::AsnIxs, data)).unwrap()
    }

    #[test]
    fn test_asn_ixs() {
        assert_eq!(
            record(&ixs_json()).memberships.lines(),
            vec![
                "AS Number 13335 Internet Exchange Information .....",
                "<IX ID: 363 -- Name: DE-CIX Frankfurt (DE-CIX Frankfurt) -- Location: Frankfurt, DE -- IPv4 Address: 80.81.193.47 -- IPv6 Address: 2001:7f8::1:0:8a5b:1 -- Speed: 100000>",
                "<IX ID: 18 -- Name: Amsterdam Internet Exchange (AMS-IX) -- Location: NL -- IPv4 Address: 80.249.211.140 -- IPv6 Address: None -- Speed: None>",
            ]
        );
    }

    #[test]
    fn test_single_membership_is_reported() {
        let data = json!([ixs_json()[0].clone()]);
        let record = record(&data);
        assert!(!record.memberships.is_empty());
        assert_eq!(record.memberships.lines().len(), 2);
    }

    #[test]
    fn test_no_memberships() {
        let record = record(&json!([]));
        assert_eq!(
            record.memberships.lines(),
            vec!["AS Number 13335 has no Internet Exchange data"]
        );
        assert!(record.blocks()[0].empty);
    }

    #[test]
    fn test_zero_speed_renders_missing() {
        let data = json!({"speed": 0});
        let fields = Fields::data(EndpointKind::AsnIxs, &data);
        assert_eq!(port_speed(&fields).unwrap(), Field::Missing);

        let data = json!({"speed": "10000"});
        let fields = Fields::data(EndpointKind::AsnIxs, &data);
        assert_eq!(port_speed(&fields).unwrap(), Field::Value(10000));
    }

    #[test]
    fn test_missing_short_name() {
        let mut data = ixs_json();
        data[0]["name"] = Value::Null;
        let record = record(&data);
        assert_eq!(record.memberships.items[0].display_name(), "DE-CIX Frankfurt");
    }
}
