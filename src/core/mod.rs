/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod asn;
pub mod asn_ixs;
pub mod asn_neighbors;
pub mod asn_prefixes;
pub mod client;
pub mod datetime;
pub mod endpoint;
pub mod errors;
pub mod field;
pub mod internet_exchange;
pub mod ip_address;
pub mod json;
pub mod normalize;
pub mod prefix;
pub mod search;
pub mod section;
