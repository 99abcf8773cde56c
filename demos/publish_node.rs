// SPDX-FileCopyrightText: 2025 Weidmueller Interface GmbH & Co. KG <oss@weidmueller.com>
//
// SPDX-License-Identifier: MIT

//! This demo publishes a node, subscribes to its samples for a while and cleans up afterwards.

use std::time::Duration;

use clap::Parser;
use opc_publisher_client::prelude::*;

mod utils;

#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    conf: utils::Config,
    /// Node id to publish
    #[arg(long)]
    node_id: String,
    /// User that receives the samples
    #[arg(long, default_value = "publish-node-demo")]
    user_id: String,
    /// Time to keep the node published in seconds
    #[arg(long, default_value_t = 10)]
    duration_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let endpoint_id = args.conf.endpoint_id.as_str();
    let client = utils::build_client_from_conf(&args.conf)?;

    let item = PublishedItem {
        publishing_interval: Some("00:00:01".to_string()),
        sampling_interval: Some("00:00:01".to_string()),
        ..PublishedItem::new(&args.node_id)
    };

    let response = client
        .start_publishing_values(endpoint_id, &PublishStartRequest::new(item))
        .await?;
    if let Some(error_info) = response.error_info.filter(|e| !e.is_good()) {
        anyhow::bail!("Publishing `{}` was rejected: {error_info:?}", args.node_id);
    }

    client.subscribe(endpoint_id, &args.user_id).await?;
    println!(
        "Publishing `{}`, samples are sent to `{}`",
        args.node_id, args.user_id
    );

    tokio::time::sleep(Duration::from_secs(args.duration_secs)).await;

    client.unsubscribe(endpoint_id, &args.user_id).await?;
    client
        .stop_publishing_values(endpoint_id, &PublishStopRequest::new(&args.node_id))
        .await?;
    println!("Stopped publishing `{}`", args.node_id);

    Ok(())
}
