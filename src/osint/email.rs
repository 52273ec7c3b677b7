//! Email address lookups

use crate::config::ProviderKeys;
use crate::osint::{links, validate, ToolReport, ToolResult};
use reqwest::Client;
use serde_json::json;

/// Run every email lookup and collect the results.
pub async fn report(client: &Client, keys: &ProviderKeys, email: &str) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Email_Validation".to_string(), validation(email));
    report.insert("Investigation_Links".to_string(), links::email_links(email));
    report.insert("EmailRep".to_string(), emailrep(client, keys, email).await);
    report.insert("Hunter".to_string(), hunter(client, keys, email).await);

    report
}

fn validation(email: &str) -> ToolResult {
    let parts = validate::split_email(email);
    ToolResult::ok(json!({
        "valid": validate::is_valid_email(email),
        "username": parts.map(|(user, _)| user),
        "domain": parts.map(|(_, domain)| domain),
    }))
}

/// EmailRep.io reputation lookup. Works unauthenticated; a key lifts the
/// rate limit when present.
async fn emailrep(client: &Client, keys: &ProviderKeys, email: &str) -> ToolResult {
    let url = format!("https://emailrep.io/{}", email);

    let mut request = client.get(&url);
    if let Some(key) = keys.emailrep.as_deref() {
        request = request.header("Key", key);
    }

    let response = match request.send().await {
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

/// Hunter.io email verifier (key required).
async fn hunter(client: &Client, keys: &ProviderKeys, email: &str) -> ToolResult {
    let Some(key) = keys.hunter.as_deref() else {
        return ToolResult::err("Hunter API key not configured");
    };

    let url = format!(
        "https://api.hunter.io/v2/email-verifier?email={}&api_key={}",
        email, key
    );

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return ToolResult::err(e.to_string()),
    };

    if !response.status().is_success() {
        return ToolResult::err(format!("API error: {}", response.status().as_u16()));
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
    fn test_validation_splits_address() {
        let result = validation("user@example.com");
        let data = result.data.unwrap();
        assert_eq!(data["valid"], json!(true));
        assert_eq!(data["username"], json!("user"));
        assert_eq!(data["domain"], json!("example.com"));
    }

    #[test]
    fn test_validation_handles_garbage() {
        let result = validation("not-an-email");
        let data = result.data.unwrap();
        assert_eq!(data["valid"], json!(false));
        assert_eq!(data["domain"], json!(null));
    }

    #[tokio::test]
    async fn test_hunter_requires_key() {
        let result = hunter(&Client::new(), &ProviderKeys::default(), "a@b.c").await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("not configured"));
    }
}
