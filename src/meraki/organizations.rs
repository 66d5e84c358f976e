//! Organization and network lookups

use crate::error::Result;
use crate::meraki::DashboardClient;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
    pub organization_id: String,
    #[serde(default)]
    pub product_types: Vec<String>,
}

/// List every organization the API key can see
pub async fn list_organizations(client: &DashboardClient) -> Result<Vec<Organization>> {
    client.get_all_pages("organizations").await
}

/// List the Systems Manager networks of an organization
pub async fn list_sm_networks(client: &DashboardClient, org_id: &str) -> Result<Vec<Network>> {
    client
        .get_all_pages(&format!(
            "organizations/{}/networks?productTypes[]=systemsManager",
            org_id
        ))
        .await
}
