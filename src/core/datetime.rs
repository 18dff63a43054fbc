use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  DateTime Format
-------------------------------------------------------------------------------------------------*/

const BGPVIEW_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A BGPView timestamp (`2001-09-20 00:00:00`). The API does not include a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(pub NaiveDateTime);

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, BGPVIEW_DATETIME_FORMAT).map(Timestamp)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BGPVIEW_DATETIME_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_timestamp() {
        let timestamp: Timestamp = "2021-05-15 07:42:08".parse().unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 5, 15)
            .unwrap()
            .and_hms_opt(7, 42, 8)
            .unwrap();
        assert_eq!(timestamp, Timestamp(expected));
        assert_eq!(timestamp.to_string(), "2021-05-15 07:42:08");
    }

    #[test]
    fn test_serialize_timestamp() {
        let timestamp: Timestamp = "2001-09-20 00:00:00".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&timestamp).unwrap(),
            r#""2001-09-20 00:00:00""#
        );
    }

    #[test]
    fn test_reject_other_formats() {
        assert!("2001-09-20T00:00:00Z".parse::<Timestamp>().is_err());
        assert!("".parse::<Timestamp>().is_err());
    }
}
