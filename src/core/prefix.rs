use crate::core::asn_neighbors::AsnSummary;
use crate::core::datetime::Timestamp;
use crate::core::errors::Result;
use crate::core::field::Field;
use crate::core::json::Fields;
use crate::core::section::TextBlock;
use ipnetwork::IpNetwork;
use serde::Serialize;
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Prefix Record
-------------------------------------------------------------------------------------------------*/

/// Prefix details and origin AS numbers from the `/prefix/{ip_address}/{cidr}` endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PrefixRecord {
    pub prefix: Field<IpNetwork>,
    pub name: Field<String>,
    pub location: Field<String>,
    pub date_allocated: Field<Timestamp>,
    pub origins: Vec<AsnSummary>,
}

impl PrefixRecord {
    pub(crate) fn from_json(data: &Fields) -> Result<Self> {
        Ok(PrefixRecord {
            prefix: data.parsed("prefix", "a prefix")?,
            name: data.text("description_short")?,
            location: data.object("country_codes")?.text("whois_country_code")?,
            date_allocated: data
                .object("rir_allocation")?
                .parsed("date_allocated", "a date")?,
            origins: data
                .array("asns")?
                .iter()
                .map(AsnSummary::from_json)
                .collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn lines(&self) -> Vec<String> {
        vec![self.to_string()]
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![TextBlock::single(self.prefix.to_string(), self.to_string())]
    }
}

impl fmt::Display for PrefixRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Prefix: {} -- Name: {} -- Location: {} -- Date Assigned: {}",
            self.prefix, self.name, self.location, self.date_allocated
        )?;
        for origin in &self.origins {
            write!(
                f,
                " | ASN: {} Name: {} Location: {}",
                origin.asn, origin.name, origin.country
            )?;
        }
        f.write_str(">")
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
