use crate::core::datetime::Timestamp;
use crate::core::errors::Result;
use crate::core::field::Field;
use crate::core::json::Fields;
use crate::core::section::TextBlock;
use log::trace;
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  ASN Classification
-------------------------------------------------------------------------------------------------*/

const PRIVATE_AS_NAME: &str = "Private AS Number (RFC6996)";
const PRIVATE_AS_LOCATION: &str = "Use within the Organization Network";
const INVALID_AS_NAME: &str = "Not a valid AS Number";

/// How an AS number is reported, based on its IANA assignment and RIR allocation status.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AsnClassification {
    /// Assigned by IANA and known to an RIR; full details are reported.
    Registered,
    /// Reserved by IANA (RFC 6996 private use).
    Private,
    /// Unknown to IANA.
    Invalid,
    /// Any other combination of statuses.
    NeedsValidation,
}

#[derive(Clone, Copy, Debug)]
enum StatusMatch {
    Is(&'static str),
    OneOf(&'static [&'static str]),
    Any,
}

impl StatusMatch {
    fn matches(&self, status: Option<&str>) -> bool {
        match (self, status) {
            (StatusMatch::Any, _) => true,
            (StatusMatch::Is(expected), Some(status)) => *expected == status,
            (StatusMatch::OneOf(expected), Some(status)) => expected.contains(&status),
            (_, None) => false,
        }
    }
}

const KNOWN_RIR_ALLOCATION_STATUSES: &[&str] = &["assigned", "allocated", "available", "reserved"];

/// IANA assignment status, RIR allocation status, outcome. The first matching row wins.
const ASN_CLASSIFICATION_TABLE: [(StatusMatch, StatusMatch, AsnClassification); 4] = [
    (
        StatusMatch::Is("assigned"),
        StatusMatch::OneOf(KNOWN_RIR_ALLOCATION_STATUSES),
        AsnClassification::Registered,
    ),
    (
        StatusMatch::Is("reserved"),
        StatusMatch::Any,
        AsnClassification::Private,
    ),
    (
        StatusMatch::Is("unknown"),
        StatusMatch::Any,
        AsnClassification::Invalid,
    ),
    (
        StatusMatch::Any,
        StatusMatch::Any,
        AsnClassification::NeedsValidation,
    ),
];

/// Classify an AS number from its IANA assignment status and RIR allocation status.
pub fn classify(
    iana_assignment_status: Option<&str>,
    rir_allocation_status: Option<&str>,
) -> AsnClassification {
    ASN_CLASSIFICATION_TABLE
        .iter()
        .find(|(iana, rir, _)| {
            iana.matches(iana_assignment_status) && rir.matches(rir_allocation_status)
        })
        .map_or(AsnClassification::NeedsValidation, |(_, _, outcome)| *outcome)
}

/*-------------------------------------------------------------------------------------------------
  ASN Record
-------------------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug)]
enum Sentinel {
    NotApplicable,
    Unverified,
}

impl Sentinel {
    fn field<T>(self) -> Field<T> {
        match self {
            Sentinel::NotApplicable => Field::NotApplicable,
            Sentinel::Unverified => Field::Unverified,
        }
    }
}

/// AS number details from the `/asn/{as_number}` endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AsnRecord {
    pub asn: Field<u32>,
    pub classification: AsnClassification,
    pub name: Field<String>,
    pub location: Field<String>,
    pub date_allocated: Field<Timestamp>,
    pub date_updated: Field<Timestamp>,
    pub rir_name: Field<String>,
    pub website: Field<String>,
    pub looking_glass: Field<String>,
    pub traffic_estimation: Field<String>,
    pub traffic_ratio: Field<String>,
}

impl AsnRecord {
    pub(crate) fn from_json(data: &Fields) -> Result<Self> {
        let asn = data.parsed("asn", "an AS number")?;
        let rir_allocation = data.object("rir_allocation")?;

        let iana_assignment_status = data.object("iana_assignment")?.text("assignment_status")?;
        let rir_allocation_status = rir_allocation.text("allocation_status")?;

        let classification = classify(
            iana_assignment_status.value().map(String::as_str),
            rir_allocation_status.value().map(String::as_str),
        );
        trace!(
            "AS {asn}: IANA {iana_assignment_status}, RIR {rir_allocation_status} => {classification:?}"
        );

        let record = match classification {
            AsnClassification::Registered => AsnRecord {
                asn,
                classification,
                name: data.text("description_short")?,
                location: data.text("country_code")?,
                date_allocated: rir_allocation.parsed("date_allocated", "a date")?,
                date_updated: data.parsed("date_updated", "a date")?,
                rir_name: rir_allocation.text("rir_name")?,
                website: data.text("website")?,
                looking_glass: data.text("looking_glass")?,
                traffic_estimation: data.text("traffic_estimation")?,
                traffic_ratio: data.text("traffic_ratio")?,
            },
            AsnClassification::Private => AsnRecord {
                name: Field::Value(PRIVATE_AS_NAME.to_string()),
                location: Field::Value(PRIVATE_AS_LOCATION.to_string()),
                ..AsnRecord::uniform(asn, classification, Sentinel::NotApplicable)
            },
            AsnClassification::Invalid => AsnRecord {
                name: Field::Value(INVALID_AS_NAME.to_string()),
                ..AsnRecord::uniform(asn, classification, Sentinel::NotApplicable)
            },
            AsnClassification::NeedsValidation => {
                AsnRecord::uniform(asn, classification, Sentinel::Unverified)
            }
        };

        Ok(record)
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("ASN: {}", self.asn),
            format!("Name: {}", self.name),
            format!("Location: {}", self.location),
            format!("Created Date: {}", self.date_allocated),
            format!("Last Update: {}", self.date_updated),
            format!("RIR: {}", self.rir_name),
            format!("Website: {}", self.website),
            format!("Looking Glass: {}", self.looking_glass),
            format!("Traffic Estimation: {}", self.traffic_estimation),
            format!("Traffic Ratio: {}", self.traffic_ratio),
        ]
    }

    /// Every field except the AS number set to the same sentinel.
    fn uniform(asn: Field<u32>, classification: AsnClassification, sentinel: Sentinel) -> Self {
        AsnRecord {
            asn,
            classification,
            name: sentinel.field(),
            location: sentinel.field(),
            date_allocated: sentinel.field(),
            date_updated: sentinel.field(),
            rir_name: sentinel.field(),
            website: sentinel.field(),
            looking_glass: sentinel.field(),
            traffic_estimation: sentinel.field(),
            traffic_ratio: sentinel.field(),
        }
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        vec![TextBlock {
            title: format!("AS{}", self.asn),
            lines: self.lines(),
            empty: false,
        }]
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
