//! Phone number lookups

use crate::config::ProviderKeys;
use crate::osint::{links, validate, ToolReport, ToolResult};
use reqwest::Client;
use serde_json::json;

/// Run every phone lookup and collect the results.
pub async fn report(client: &Client, keys: &ProviderKeys, number: &str) -> ToolReport {
    let mut report = ToolReport::new();

    report.insert("Phone_Validation".to_string(), validation(number));
    report.insert("Investigation_Links".to_string(), links::phone_links(number));
    report.insert("NumLookup".to_string(), numverify(client, keys, number).await);

    report
}

fn validation(number: &str) -> ToolResult {
    ToolResult::ok(json!({
        "valid": validate::is_valid_phone(number),
        "format": number,
        "country_code": validate::phone_country_prefix(number).unwrap_or("Unknown"),
    }))
}

/// NumVerify number-validation API (apilayer).
async fn numverify(client: &Client, keys: &ProviderKeys, number: &str) -> ToolResult {
    let Some(key) = keys.numverify.as_deref() else {
        return ToolResult::err("NumVerify API key not configured");
    };

    let url = format!(
        "http://apilayer.net/api/validate?access_key={}&number={}",
        key, number
    );

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return ToolResult::err(e.to_string()),
    };

    if !response.status().is_success() {
        return ToolResult::err(format!("API error: {}", response.status().as_u16()));
    }

    let body: serde_json::Value = match response.json().await {
        Ok(body) => body,
        Err(e) => return ToolResult::err(e.to_string()),
    };

    if body["valid"].as_bool() != Some(true) {
        return ToolResult::err("Invalid phone number");
    }

    ToolResult::ok(json!({
        "valid": body.get("valid"),
        "number": body.get("number"),
        "local_format": body.get("local_format"),
        "international_format": body.get("international_format"),
        "country_prefix": body.get("country_prefix"),
        "country_code": body.get("country_code"),
        "country_name": body.get("country_name"),
        "location": body.get("location"),
        "carrier": body.get("carrier"),
        "line_type": body.get("line_type"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_does_not_suppress_other_lookups() {
        let client = Client::new();
        let keys = ProviderKeys::default();

        let report = report(&client, &keys, "+14155552671").await;

        assert!(report["Phone_Validation"].success);
        assert!(report["Investigation_Links"].success);
        assert!(!report["NumLookup"].success);
        assert_eq!(
            report["NumLookup"].error.as_deref(),
            Some("NumVerify API key not configured")
        );
    }

    #[test]
    fn test_validation_flags_invalid_numbers() {
        let result = validation("abc");
        assert!(result.success);
        assert_eq!(result.data.unwrap()["valid"], json!(false));
    }
}
