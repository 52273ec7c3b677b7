//! IP address lookups

use crate::osint::{links, validate, ToolReport, ToolResult};
use crate::services::ShodanClient;
use reqwest::Client;
use serde_json::json;

/// Run every IP lookup and collect the results.
pub async fn report(client: &Client, shodan: &ShodanClient, ip: &str) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("IP_Validation".to_string(), validation(ip));
    report.insert("Investigation_Links".to_string(), links::ip_links(ip));
    report.insert("IP_Geolocation".to_string(), geolocation(client, ip).await);
    report.insert("Shodan_IP_Search".to_string(), shodan.host(ip).await);

    report
}

fn validation(ip: &str) -> ToolResult {
    ToolResult::ok(json!({
        "valid": validate::is_valid_ipv4(ip),
        "ip": ip,
    }))
}

/// Free geolocation lookup via ipapi.co (no key required).
async fn geolocation(client: &Client, ip: &str) -> ToolResult {
    let url = format!("https://ipapi.co/{}/json/", ip);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return ToolResult::err(e.to_string()),
    };

    if !response.status().is_success() {
        return ToolResult::err("API unavailable");
    }

    match response.json::<serde_json::Value>().await {
        Ok(body) => ToolResult::ok(body),
        Err(e) => ToolResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let result = validation("8.8.8.8");
        assert_eq!(result.data.unwrap()["valid"], json!(true));

        let result = validation("300.0.0.1");
        assert_eq!(result.data.unwrap()["valid"], json!(false));
    }

    #[tokio::test]
    async fn test_shodan_failure_does_not_suppress_validation() {
        let client = Client::new();
        let shodan = ShodanClient::new(client.clone(), None);

        let report = report(&client, &shodan, "8.8.8.8").await;

        assert!(report["IP_Validation"].success);
        assert!(report["Investigation_Links"].success);
        assert!(!report["Shodan_IP_Search"].success);
    }
}
