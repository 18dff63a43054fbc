use crate::cli;
use bgpview::ipnetwork::IpNetwork;
use bgpview::{Client, ClientBuilder, EndpointKind, LookupRequest, Result};
use log::warn;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the BGPView client from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_client(args: &cli::Args) -> Result<Client> {
    let mut builder = ClientBuilder::new();

    if args.insecure {
        builder.accept_invalid_certs(true);
    }
    if let Some(retry_count) = args.retry_count {
        builder.retry_count(retry_count);
    }
    if let Some(retry_delay) = args.retry_delay {
        builder.retry_delay(retry_delay);
    }

    builder.build()
}

/*--------------------------------------------------------------------------------------
  Check lookup values
--------------------------------------------------------------------------------------*/

/// Warn about prefix and IP address values that do not parse. They are still sent; BGPView
/// reports malformed input in its response.
pub fn check_request(request: &LookupRequest) {
    let value = request.value();
    match request.kind() {
        EndpointKind::Prefix if value.parse::<IpNetwork>().is_err() => {
            warn!("{:?} is not a valid CIDR prefix; sending it as-is", value)
        }
        EndpointKind::IpAddress if value.parse::<IpAddr>().is_err() => {
            warn!("{:?} is not a valid IP address; sending it as-is", value)
        }
        _ => {}
    }
}
