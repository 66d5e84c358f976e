//! Systems Manager device operations

use crate::error::Result;
use crate::meraki::DashboardClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Fields requested on top of the defaults; the cellular identifiers are
/// only returned when asked for explicitly
const DEVICE_FIELDS: [&str; 5] = ["imei", "iccid", "simCarrierNetwork", "phoneNumber", "tags"];

/// A Systems Manager device as returned by the device listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "tags_or_default")]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub imei: Option<String>,
    #[serde(default)]
    pub iccid: Option<String>,
    #[serde(default)]
    pub sim_carrier_network: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Device {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// `tags` may come back as `null` for devices that were never tagged
fn tags_or_default<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModifyTagsRequest<'a> {
    ids: [&'a str; 1],
    tags: Vec<&'a str>,
    update_action: &'static str,
}

/// Fetch all Systems Manager devices of a network, with cellular identifiers and tags
pub async fn list_devices(client: &DashboardClient, network_id: &str) -> Result<Vec<Device>> {
    let fields = DEVICE_FIELDS
        .iter()
        .map(|f| format!("fields[]={}", f))
        .collect::<Vec<_>>()
        .join("&");

    client
        .get_all_pages(&format!("networks/{}/sm/devices?{}", network_id, fields))
        .await
}

/// Replace a device's tag set
///
/// The `update` action overwrites the existing tags, so `tags` must be the
/// complete resulting set.
pub async fn replace_device_tags(
    client: &DashboardClient,
    network_id: &str,
    device_id: &str,
    tags: &BTreeSet<String>,
) -> Result<()> {
    let request = ModifyTagsRequest {
        ids: [device_id],
        tags: tags.iter().map(String::as_str).collect(),
        update_action: "update",
    };

    let _: Value = client
        .post(
            &format!("networks/{}/sm/devices/modifyTags", network_id),
            &request,
        )
        .await?;

    Ok(())
}
