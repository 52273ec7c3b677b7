//! Shodan API client
//!
//! Thin wrapper around the two Shodan endpoints the reports use: the host
//! information endpoint and the search endpoint. Responses are mapped down
//! to the handful of fields the reports expose; a 403 from the free plan is
//! special-cased into an actionable error record.

use crate::osint::ToolResult;
use reqwest::Client;
use serde_json::{json, Value};

const SHODAN_API_BASE: &str = "https://api.shodan.io";

/// Client for Shodan host and search lookups
#[derive(Clone)]
pub struct ShodanClient {
    client: Client,
    api_key: Option<String>,
}

impl ShodanClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up everything Shodan knows about one IP address.
    pub async fn host(&self, ip: &str) -> ToolResult {
        let Some(key) = self.api_key.as_deref() else {
            return ToolResult::err("Shodan API key not configured");
        };

        let url = format!("{}/shodan/host/{}?key={}", SHODAN_API_BASE, ip, key);
        match self.get_json(&url, None).await {
            Ok(body) => ToolResult::ok(json!({
                "ip": body.get("ip_str"),
                "ports": body.get("ports").cloned().unwrap_or_else(|| json!([])),
                "hostnames": body.get("hostnames").cloned().unwrap_or_else(|| json!([])),
                "country_name": body.get("country_name"),
                "city": body.get("city"),
                "org": body.get("org"),
                "os": body.get("os"),
                "data": body.get("data").cloned().unwrap_or_else(|| json!([])),
                "message": format!("Shodan data found for IP {}", ip),
            })),
            Err(e) => e,
        }
    }

    /// Run a Shodan search query (e.g. `hostname:example.com`).
    pub async fn search(&self, query: &str) -> ToolResult {
        let Some(key) = self.api_key.as_deref() else {
            return ToolResult::err("Shodan API key not configured");
        };

        let url = format!(
            "{}/shodan/host/search?key={}&query={}",
            SHODAN_API_BASE, key, query
        );
        match self.get_json(&url, Some(query)).await {
            Ok(body) => {
                let total = body.get("total").and_then(Value::as_u64).unwrap_or(0);
                ToolResult::ok(json!({
                    "total_results": total,
                    "matches": body.get("matches").cloned().unwrap_or_else(|| json!([])),
                    "message": format!("Found {} Shodan results for '{}'", total, query),
                }))
            }
            Err(e) => e,
        }
    }

    async fn get_json(&self, url: &str, search_query: Option<&str>) -> Result<Value, ToolResult> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ToolResult::err(format!("Shodan request failed: {}", e)))?;

        let status = response.status();

        if status.as_u16() == 403 {
            // Free-plan keys can query the API but not search it.
            return Err(membership_required(search_query));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ToolResult::err(format!(
                "Shodan API error: {} - {}",
                status.as_u16(),
                text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ToolResult::err(format!("Failed to parse Shodan response: {}", e)))
    }
}

/// Error record for the free plan's 403. Carries upgrade guidance as
/// contextual `data` alongside the error; search queries also get a
/// pre-filled web interface link.
fn membership_required(search_query: Option<&str>) -> ToolResult {
    let mut upgrade_info = json!({
        "current_plan": "oss (Open Source Software)",
        "recommendation": "Upgrade to Membership or Professional plan for full search access",
        "alternative": "Use Shodan web interface for manual searches",
    });
    if let Some(query) = search_query {
        upgrade_info["web_interface"] =
            json!(format!("https://www.shodan.io/search?query={}", query));
    }

    let mut result = ToolResult::err(
        "Shodan search requires paid membership. Free plan has limited access.",
    );
    result.data = Some(json!({ "upgrade_info": upgrade_info }));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_graceful() {
        let client = ShodanClient::new(Client::new(), None);
        assert!(!client.is_configured());

        let result = client.host("8.8.8.8").await;
        assert!(!result.success);
        assert_eq!(result.error.unwrap(), "Shodan API key not configured");

        let result = client.search("hostname:example.com").await;
        assert!(!result.success);
    }

    #[test]
    fn test_membership_record_carries_upgrade_guidance() {
        let result = membership_required(Some("hostname:example.com"));

        // Error with contextual data, not one or the other
        assert!(!result.success);
        assert!(result.error.as_ref().unwrap().contains("paid membership"));

        let info = &result.data.as_ref().unwrap()["upgrade_info"];
        assert_eq!(info["current_plan"], "oss (Open Source Software)");
        assert_eq!(
            info["web_interface"],
            "https://www.shodan.io/search?query=hostname:example.com"
        );
    }

    #[test]
    fn test_membership_record_without_query_has_no_web_link() {
        let result = membership_required(None);
        let info = &result.data.as_ref().unwrap()["upgrade_info"];
        assert!(info.get("web_interface").is_none());
        assert_eq!(info["current_plan"], "oss (Open Source Software)");
    }
}
