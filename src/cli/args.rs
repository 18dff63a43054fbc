use bgpview::{EndpointKind, LookupRequest};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Look up BGP data from the BGPView API.", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Lines, global = true)]
    pub output: OutputFormat,

    /// Save the results to a CSV file
    #[arg(long = "csv", global = true)]
    pub csv_file: Option<PathBuf>,

    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Number of attempts made to retrieve the lookup URL
    #[arg(long, global = true)]
    pub retry_count: Option<u32>,

    /// Delay between attempts, in milliseconds
    #[arg(long, global = true)]
    pub retry_delay: Option<u64>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

/*--------------------------------------------------------------------------------------
  Lookup Commands
--------------------------------------------------------------------------------------*/

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// AS number details; each AS number is looked up independently
    Asn {
        #[arg(required = true, num_args = 1..)]
        as_numbers: Vec<String>,
    },

    /// IPv4 and IPv6 prefixes announced by an AS number
    Prefixes { as_number: String },

    /// BGP peers of an AS number
    Peers { as_number: String },

    /// Upstream (transit) AS numbers
    Upstreams { as_number: String },

    /// Downstream (customer) AS numbers
    Downstreams { as_number: String },

    /// Internet Exchanges an AS number is connected to
    Ixs { as_number: String },

    /// Prefix details and origin AS numbers (CIDR format, e.g. 192.209.63.0/24)
    Prefix { prefix: String },

    /// Covering prefix and origin AS numbers of an IP address
    Ip { ip_address: String },

    /// Internet Exchange details and members
    Ix { ix_id: String },

    /// Full-text search across AS numbers, prefixes, and Internet Exchanges
    Search {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },
}

impl Command {
    /// One lookup per value; only `asn` accepts several.
    pub fn requests(&self) -> Vec<LookupRequest> {
        let (kind, value) = match self {
            Command::Asn { as_numbers } => {
                return as_numbers
                    .iter()
                    .map(|as_number| LookupRequest::new(EndpointKind::Asn, as_number))
                    .collect()
            }
            Command::Prefixes { as_number } => (EndpointKind::AsnPrefixes, as_number.clone()),
            Command::Peers { as_number } => (EndpointKind::AsnPeers, as_number.clone()),
            Command::Upstreams { as_number } => (EndpointKind::AsnUpstreams, as_number.clone()),
            Command::Downstreams { as_number } => {
                (EndpointKind::AsnDownstreams, as_number.clone())
            }
            Command::Ixs { as_number } => (EndpointKind::AsnIxs, as_number.clone()),
            Command::Prefix { prefix } => (EndpointKind::Prefix, prefix.clone()),
            Command::Ip { ip_address } => (EndpointKind::IpAddress, ip_address.clone()),
            Command::Ix { ix_id } => (EndpointKind::InternetExchange, ix_id.clone()),
            Command::Search { terms } => (EndpointKind::Search, terms.join(" ")),
        };
        vec![LookupRequest::new(kind, value)]
    }
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per item, as returned by the record
    #[default]
    Lines,

    /// A table of sections and lines
    Table,

    /// The typed record as JSON (an array when several AS numbers are looked up)
    Json,
}
