//! Domain / website lookups

use crate::osint::{links, validate, ToolReport, ToolResult};
use crate::services::ShodanClient;
use serde_json::json;
use tokio::net::lookup_host;

/// Run every domain lookup and collect the results.
pub async fn report(shodan: &ShodanClient, domain: &str) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Domain_Validation".to_string(), validation(domain));
    report.insert("Investigation_Links".to_string(), links::domain_links(domain));
    report.insert("DNS_Lookup".to_string(), dns_lookup(domain).await);
    report.insert(
        "Shodan_Search".to_string(),
        shodan.search(&format!("hostname:{}", domain)).await,
    );

    report
}

fn validation(domain: &str) -> ToolResult {
    ToolResult::ok(json!({
        "valid": validate::is_valid_domain(domain),
        "domain": domain,
    }))
}

/// Resolve the domain's addresses with the system resolver.
async fn dns_lookup(domain: &str) -> ToolResult {
    // lookup_host needs a port; it is discarded from the results.
    match lookup_host((domain, 0u16)).await {
        Ok(addrs) => {
            let addresses: Vec<String> = addrs.map(|a| a.ip().to_string()).collect();
            ToolResult::ok(json!({
                "domain": domain,
                "addresses": addresses,
            }))
        }
        Err(e) => ToolResult::err(format!("DNS resolution failed: {}", e)),
    }
}
