// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! This demo lists all nodes that are currently published for an endpoint.

use clap::Parser;
use futures::StreamExt;

mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let conf = utils::Config::parse();
    let client = utils::build_client_from_conf(&conf)?;

    let mut items = Box::pin(client.published_nodes_stream(&conf.endpoint_id));
    let mut count = 0;

    while let Some(item) = items.next().await {
        let item = item?;
        println!(
            "{} (publishing: {}, sampling: {})",
            item.node_id,
            item.publishing_interval.as_deref().unwrap_or("-"),
            item.sampling_interval.as_deref().unwrap_or("-"),
        );
        count += 1;
    }

    println!("{count} published nodes on endpoint `{}`", conf.endpoint_id);

    Ok(())
}
