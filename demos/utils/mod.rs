//!Utility functions and shared code for the demos

use std::time::Duration;

use clap::Parser;
use opc_publisher_client::prelude::*;

/// Connection settings shared by all demos.
#[derive(Parser, Debug)]
pub struct Config {
    /// Address of the publisher service
    #[arg(long, default_value = DEFAULT_PUBLISHER_SERVICE_ADDRESS)]
    pub base_uri: String,
    /// Id of an activated and connected endpoint
    #[arg(long)]
    pub endpoint_id: String,
    /// Number of sends per request, including the first one
    #[arg(long, default_value_t = 3)]
    pub retry_attempts: u32,
    /// Delay between two sends in seconds
    #[arg(long, default_value_t = 2)]
    pub retry_delay_secs: u64,
}

pub fn build_client_from_conf(conf: &Config) -> anyhow::Result<PublisherClient> {
    let options = ClientOptionsBuilder::new()
        .with_base_uri(&conf.base_uri)
        .with_retry_policy(
            RetryPolicy::default()
                .max_attempts(conf.retry_attempts)
                .delay(Duration::from_secs(conf.retry_delay_secs)),
        )
        .with_request_timeout(Duration::from_secs(30))
        .build();

    Ok(PublisherClient::new(&options)?)
}
