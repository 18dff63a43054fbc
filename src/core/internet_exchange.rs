use crate::core::asn_ixs::port_speed;
use crate::core::errors::Result;
use crate::core::field::{self, Field};
use crate::core::json::Fields;
use crate::core::section::{Section, TextBlock};
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  IX Member
-------------------------------------------------------------------------------------------------*/

/// An AS number connected to an Internet Exchange.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IxMember {
    pub asn: Field<u32>,
    pub name: Field<String>,
    pub country: Field<String>,
    pub ipv4_address: Field<String>,
    pub ipv6_address: Field<String>,
    pub speed: Field<u64>,
}

impl IxMember {
    fn from_json(item: &Fields) -> Result<Self> {
        Ok(IxMember {
            asn: item.parsed("asn", "an AS number")?,
            name: item.text("description")?,
            country: item.text("country_code")?,
            ipv4_address: item.text("ipv4_address")?,
            ipv6_address: item.text("ipv6_address")?,
            speed: port_speed(item)?,
        })
    }
}

impl fmt::Display for IxMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ASN: {} -- Name: {} -- Location: {} -- IPv4 Address: {} -- IPv6 Address: {} -- Speed: {}>",
            self.asn, self.name, self.country, self.ipv4_address, self.ipv6_address, self.speed
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  Internet Exchange Record
-------------------------------------------------------------------------------------------------*/

/// Internet Exchange details and members from the `/ix/{ix_id}` endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InternetExchangeRecord {
    pub ix_id: String,
    pub name: Field<String>,
    pub city: Field<String>,
    pub country: Field<String>,
    pub members_count: Field<u32>,
    pub members: Section<IxMember>,
}

impl InternetExchangeRecord {
    pub(crate) fn from_json(ix_id: &str, data: &Fields) -> Result<Self> {
        let members = data
            .array("members")?
            .iter()
            .map(IxMember::from_json)
            .collect::<Result<Vec<_>>>()?;

        Ok(InternetExchangeRecord {
            ix_id: ix_id.to_string(),
            name: data.text("name_full")?,
            city: data.text("city")?,
            country: data.text("country_code")?,
            members_count: data.parsed("members_count", "a member count")?,
            members: Section::new(
                format!("Internet Exchange {ix_id} Members ....."),
                format!("Internet Exchange {ix_id} has no members"),
                members,
            ),
        })
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![
            TextBlock::single(format!("IX {}", self.ix_id), self.to_string()),
            self.members.block("Members"),
        ]
    }
}

impl fmt::Display for InternetExchangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IX: {} -- Name: {} -- ASN Membership: {} -- Location: {}",
            self.ix_id,
            self.name,
            self.members_count,
            field::location(&self.city, &self.country)
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
