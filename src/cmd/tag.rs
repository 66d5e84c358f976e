/// Cellular / Wi-Fi tagging of Systems Manager devices
///
/// Single pass over one network:
/// - Resolve organization and network by exact name
/// - Fetch every SM device with its cellular identifiers and tags
/// - Classify each device and reconcile its tags
/// - Replace the tag set of devices that need a change
/// - Report totals
use crate::config::{Config, BASE_URL_VAR};
use crate::error::{Result, SmTagError};
use crate::meraki::sm::{self, Device};
use crate::meraki::DashboardClient;
use crate::tagging::classify::classify;
use crate::tagging::reconcile::{reconcile, TagConfig, TagDecision};
use crate::tagging::resolve::resolve_target;
use crate::tagging::summary::RunSummary;
use clap::Args;
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Organization name (exact, case-sensitive)
    #[arg(long)]
    pub org_name: String,

    /// Name of the Systems Manager network to use (exact, case-sensitive)
    #[arg(long)]
    pub network_name: String,

    /// Tag applied to cellular-capable devices [default: Store_iPad]
    #[arg(long)]
    pub cellular_tag: Option<String>,

    /// Tag applied to Wi-Fi-only devices [default: Curbside_iPad]
    #[arg(long)]
    pub wifi_tag: Option<String>,

    /// Remove the opposite tag from devices that carry it
    #[arg(long)]
    pub remove_wrong: bool,

    /// Dry run - show what would be tagged without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Log file to append to [default: sm_tagger.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TagArgs {
    pub fn tag_config(&self, config: &Config) -> TagConfig {
        TagConfig {
            cellular_tag: config.cellular_tag(self.cellular_tag.clone()),
            wifi_tag: config.wifi_tag(self.wifi_tag.clone()),
            remove_wrong: self.remove_wrong,
        }
    }
}

/// Tag every SM device in the named network
///
/// Resolution and fetch failures abort the run. Per-device update failures
/// are counted in the returned summary and never abort.
pub async fn tag(args: &TagArgs, config: &Config, api_key: String) -> Result<RunSummary> {
    let base_url = config.base_url(std::env::var(BASE_URL_VAR).ok());
    let client = DashboardClient::with_base_url(api_key, &base_url);
    let tag_config = args.tag_config(config);

    println!("{} Systems Manager devices...", "Tagging".cyan().bold());
    tracing::debug!("Dashboard API: {}", client.base_url());
    tracing::info!(
        "Cellular tag '{}', Wi-Fi tag '{}', remove wrong tags: {}",
        tag_config.cellular_tag,
        tag_config.wifi_tag,
        tag_config.remove_wrong
    );
    if tag_config.cellular_tag == tag_config.wifi_tag {
        tracing::warn!(
            "Cellular and Wi-Fi tags are both '{}'; wrong tags will not be removed",
            tag_config.cellular_tag
        );
    }

    let target = resolve_target(&client, &args.org_name, &args.network_name).await?;
    tracing::info!(
        "Resolved network name '{}' to ID {} (organization {})",
        target.network.name,
        target.network.id,
        target.organization.id
    );

    let devices = sm::list_devices(&client, &target.network.id)
        .await
        .map_err(|e| SmTagError::FetchError {
            network_id: target.network.id.clone(),
            source: Box::new(e),
        })?;
    tracing::info!("Total Systems Manager devices retrieved: {}", devices.len());

    let summary = process_devices(
        &client,
        &target.network.id,
        &devices,
        &tag_config,
        args.dry_run,
    )
    .await;

    summary.log(args.dry_run);
    summary.print(args.dry_run);

    Ok(summary)
}

/// Classify, reconcile and apply, one device at a time
pub async fn process_devices(
    client: &DashboardClient,
    network_id: &str,
    devices: &[Device],
    tag_config: &TagConfig,
    dry_run: bool,
) -> RunSummary {
    let mut summary = RunSummary {
        total: devices.len(),
        ..Default::default()
    };

    for device in devices {
        let Some(device_id) = device.id.as_deref().filter(|id| !id.is_empty()) else {
            tracing::warn!("Skipping device without an id: {:?}", device);
            summary.record_skipped();
            continue;
        };

        tracing::debug!("Processing device: {:?}", device);

        let classification = classify(device);
        let decision = reconcile(device_id, &device.tags, classification, tag_config);
        log_decision(device, &decision, tag_config);

        if decision.is_unchanged() {
            summary.record_unchanged();
            continue;
        }

        if dry_run {
            summary.record_planned();
            continue;
        }

        match apply_decision(client, network_id, device, &decision).await {
            Ok(new_tags) => {
                tracing::info!(
                    "Device id '{}' updated, tags now {:?}",
                    device_id,
                    new_tags
                );
                summary.record_updated(
                    classification,
                    !decision.tags_to_add.is_empty(),
                    !decision.tags_to_remove.is_empty(),
                );
            }
            Err(e) => {
                tracing::error!("{}", e);
                summary.record_failed();
            }
        }
    }

    summary
}

/// Send the device's full resulting tag set
async fn apply_decision(
    client: &DashboardClient,
    network_id: &str,
    device: &Device,
    decision: &TagDecision,
) -> Result<BTreeSet<String>> {
    let new_tags = decision.resulting_tags(&device.tags);

    sm::replace_device_tags(client, network_id, &decision.device_id, &new_tags)
        .await
        .map_err(|e| SmTagError::UpdateError {
            device_id: decision.device_id.clone(),
            source: Box::new(e),
        })?;

    Ok(new_tags)
}

fn log_decision(device: &Device, decision: &TagDecision, tag_config: &TagConfig) {
    let desired = tag_config.desired_tag(decision.classification);
    let kind = decision.classification;

    if decision.tags_to_add.is_empty() {
        tracing::info!(
            "Device id '{}' ({}) is {} and already has the correct tag '{}'",
            decision.device_id,
            device.display_name(),
            kind,
            desired
        );
    } else {
        tracing::info!(
            "Device id '{}' ({}) is {} but missing tag in {:?}, tagging with '{}'",
            decision.device_id,
            device.display_name(),
            kind,
            device.tags,
            desired
        );
    }

    for wrong in &decision.tags_to_remove {
        tracing::info!(
            "Device id '{}' is {} but incorrectly tagged with '{}', removing",
            decision.device_id,
            kind,
            wrong
        );
    }
}
