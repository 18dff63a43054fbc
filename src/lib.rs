//! Look up Autonomous System, prefix, peering, and Internet Exchange data from the
//! [BGPView API](https://bgpview.docs.apiary.io/).
//!
//! Every lookup resolves an endpoint URL template, retrieves it with a fixed-delay retry loop,
//! and flattens the JSON response into a typed record that also renders as human-readable lines.
//! Empty collections render as an informative message ("AS Number 1 has no IPv4 Peers"), so a
//! record always has at least one line.
//!
//! ```no_run
//! let client = bgpview::Client::new()?;
//!
//! let asn = client.asn(13335)?;
//! for line in asn.lines() {
//!     println!("{line}");
//! }
//!
//! let prefixes = client.asn_prefixes(13335)?;
//! for block in prefixes.blocks() {
//!     println!("{}", block.lines.join("\n"));
//! }
//! # Ok::<(), bgpview::Error>(())
//! ```
//!
//! Missing data is rendered with a sentinel instead of failing the lookup: [MISSING] (`None`)
//! for `null` fields, [NOT_APPLICABLE] (`N/A`) for fields that do not apply to a record, and
//! [UNVERIFIED] for AS numbers whose registry status needs a human to interpret.

mod core;

/*-------------------------------------------------------------------------------------------------
  Primary Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{fetch, lookup, Client, ClientBuilder, FetchOutcome};
pub use crate::core::endpoint::{resolve, EndpointKind, EndpointTemplate, LookupRequest, Placeholder};
pub use crate::core::errors::{Error, Result};
pub use crate::core::normalize::{normalize, NormalizedRecord};

/*-------------------------------------------------------------------------------------------------
  Records
-------------------------------------------------------------------------------------------------*/

pub use crate::core::asn::{classify, AsnClassification, AsnRecord};
pub use crate::core::asn_ixs::{AsnIxs, IxMembership};
pub use crate::core::asn_neighbors::{AsnNeighbors, AsnSummary, Relation};
pub use crate::core::asn_prefixes::{AnnouncedPrefix, AsnPrefixes};
pub use crate::core::internet_exchange::{InternetExchangeRecord, IxMember};
pub use crate::core::ip_address::IpAddressRecord;
pub use crate::core::prefix::PrefixRecord;
pub use crate::core::search::{SearchAsn, SearchIx, SearchPrefix, SearchResults};

/*-------------------------------------------------------------------------------------------------
  Building Blocks
-------------------------------------------------------------------------------------------------*/

pub use crate::core::datetime::Timestamp;
pub use crate::core::field::{Field, MISSING, NOT_APPLICABLE, UNVERIFIED};
pub use crate::core::json::{parse, JsonResponse, RemoteStatus};
pub use crate::core::section::{Section, TextBlock};

// Re-export ipnetwork; the records use its IpNetwork type
pub use ipnetwork;
