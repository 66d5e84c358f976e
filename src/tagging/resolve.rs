//! Organization and network name resolution

use crate::error::{Result, SmTagError};
use crate::meraki::organizations::{self, Network, Organization};
use crate::meraki::DashboardClient;

pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Organization {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Network {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The organization and network a run operates on
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    pub organization: Organization,
    pub network: Network,
}

/// Pick the single item whose name matches exactly (case-sensitive)
///
/// Zero matches is `NotFound`; more than one is `Ambiguous`.
pub fn select_unique<'a, T: Named>(
    items: &'a [T],
    name: &str,
    kind: &'static str,
) -> Result<&'a T> {
    let matches: Vec<&T> = items.iter().filter(|item| item.name() == name).collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(SmTagError::NotFound {
            kind,
            name: name.to_string(),
        }),
        _ => Err(SmTagError::Ambiguous {
            kind,
            name: name.to_string(),
            count: matches.len(),
        }),
    }
}

/// Resolve organization and network names to their identifiers
pub async fn resolve_target(
    client: &DashboardClient,
    org_name: &str,
    network_name: &str,
) -> Result<ResolvedTarget> {
    let orgs = organizations::list_organizations(client).await?;
    tracing::debug!("API key can see {} organizations", orgs.len());
    let organization = select_unique(&orgs, org_name, "Organization")?.clone();

    let networks = organizations::list_sm_networks(client, &organization.id).await?;
    tracing::debug!(
        "Organization {} has {} Systems Manager networks",
        organization.id,
        networks.len()
    );
    let network = select_unique(&networks, network_name, "Network")?.clone();
    tracing::debug!(
        "Network {} belongs to {} with products {:?}",
        network.id,
        network.organization_id,
        network.product_types
    );

    Ok(ResolvedTarget {
        organization,
        network,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn org(id: &str, name: &str) -> Organization {
        Organization {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_select_unique_exact_match() {
        let orgs = vec![org("1", "Acme"), org("2", "Acme Labs")];
        let found = select_unique(&orgs, "Acme", "Organization").unwrap();
        assert_eq!(found.id, "1");
    }

    #[test]
    fn test_select_unique_is_case_sensitive() {
        let orgs = vec![org("1", "Acme")];
        let err = select_unique(&orgs, "acme", "Organization").unwrap_err();
        assert!(matches!(err, SmTagError::NotFound { kind: "Organization", .. }));
    }

    #[test]
    fn test_select_unique_duplicate_names() {
        let orgs = vec![org("1", "Acme"), org("2", "Acme")];
        let err = select_unique(&orgs, "Acme", "Organization").unwrap_err();
        assert!(matches!(err, SmTagError::Ambiguous { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_ambiguous_org_makes_no_network_call() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "1", "name": "Acme"},
                {"id": "2", "name": "Acme"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/(organizations/.+|networks/.+)$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = DashboardClient::with_base_url("k".into(), &server.uri());
        let err = resolve_target(&client, "Acme", "Stores").await.unwrap_err();
        assert!(err.is_resolution());
    }

    #[tokio::test]
    async fn test_resolve_target() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "1", "name": "Acme"},
                {"id": "2", "name": "Other"}
            ])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/organizations/1/networks"))
            .and(query_param("productTypes[]", "systemsManager"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "N_1",
                    "name": "Stores",
                    "organizationId": "1",
                    "productTypes": ["systemsManager"]
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = DashboardClient::with_base_url("k".into(), &server.uri());
        let target = resolve_target(&client, "Acme", "Stores").await.unwrap();
        assert_eq!(target.organization.id, "1");
        assert_eq!(target.network.id, "N_1");
    }

    #[tokio::test]
    async fn test_missing_network() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": "1", "name": "Acme"}])),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/organizations/1/networks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = DashboardClient::with_base_url("k".into(), &server.uri());
        let err = resolve_target(&client, "Acme", "Stores").await.unwrap_err();
        assert!(matches!(err, SmTagError::NotFound { kind: "Network", .. }));
    }
}
