//! Investigation link lists
//!
//! Every report includes a fixed set of manual-investigation links for its
//! category. These are static data, recorded as a successful lookup so the
//! front end renders them alongside live results.

use crate::osint::ToolResult;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub name: &'static str,
    pub url: String,
}

fn link(name: &'static str, url: String) -> Link {
    Link { name, url }
}

fn links_result(links: Vec<Link>) -> ToolResult {
    ToolResult::ok(json!({ "links": links }))
}

pub fn phone_links(number: &str) -> ToolResult {
    links_result(vec![
        link("Truecaller", format!("https://www.truecaller.com/search/{number}")),
        link("NumLookup", format!("https://numlookupapi.com/{number}")),
        link("PhoneInfoga", "https://github.com/sundowndev/phoneinfoga".into()),
        link("OSINT Framework", "https://osintframework.com/".into()),
        link("SpyDialer", format!("https://spydialer.com/{number}")),
        link("Whitepages", format!("https://www.whitepages.com/phone/{number}")),
    ])
}

pub fn email_links(email: &str) -> ToolResult {
    links_result(vec![
        link("HaveIBeenPwned", format!("https://haveibeenpwned.com/unifiedsearch/{email}")),
        link("EmailRep.io", format!("https://emailrep.io/{email}")),
        link("Holehe", "https://github.com/megadose/holehe".into()),
        link("H8mail", "https://github.com/khast3x/h8mail".into()),
        link("Hunt", "https://hunt.io/".into()),
        link("BreachDirectory", "https://breachdirectory.p.rapidapi.com/".into()),
    ])
}

pub fn ip_links(ip: &str) -> ToolResult {
    links_result(vec![
        link("AbuseIPDB", format!("https://www.abuseipdb.com/check/{ip}")),
        link("VirusTotal", format!("https://www.virustotal.com/gui/ip-address/{ip}")),
        link("IPVoid", format!("https://www.ipvoid.com/ip-blacklist-check/{ip}")),
        link(
            "IPQualityScore",
            format!("https://www.ipqualityscore.com/free-ip-lookup-proxy-vpn-test/lookup/{ip}"),
        ),
        link("IP2Location", format!("https://www.ip2location.com/demo/{ip}")),
        link("MaxMind", "https://www.maxmind.com/en/geoip2-demo".into()),
        link("Shodan", format!("https://www.shodan.io/host/{ip}")),
        link("Censys", format!("https://censys.io/ipv4/{ip}")),
    ])
}

pub fn domain_links(domain: &str) -> ToolResult {
    links_result(vec![
        link("Sublist3r", "https://github.com/aboul3la/Sublist3r".into()),
        link("Amass", "https://github.com/owasp-amass/amass".into()),
        link("BuiltWith", format!("https://builtwith.com/{domain}")),
        link("Wappalyzer", format!("https://www.wappalyzer.com/lookup/{domain}")),
        link("SecurityTrails", format!("https://securitytrails.com/app/domain/{domain}")),
        link("ViewDNS", format!("https://viewdns.info/reverseip/?host={domain}")),
        link("DNSDumpster", "https://dnsdumpster.com/".into()),
        link("Censys", "https://censys.io/".into()),
    ])
}

pub fn username_links(_username: &str) -> ToolResult {
    links_result(vec![
        link("Maigret", "https://github.com/soxoj/maigret".into()),
        link("Sherlock", "https://github.com/sherlock-project/sherlock".into()),
        link("WhatsMyName", "https://whatsmyname.app/".into()),
        link("NameChk", "https://namechk.com/".into()),
        link("CheckUsernames", "https://checkusernames.com/".into()),
        link("KnowEm", "https://knowem.com/".into()),
        link("UserSearch", "https://usersearch.org/".into()),
        link("Social Searcher", "https://www.social-searcher.com/".into()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_embed_the_input() {
        let result = phone_links("+14155552671");
        let value = serde_json::to_value(&result).unwrap();
        let links = value["data"]["links"].as_array().unwrap();
        assert_eq!(links.len(), 6);
        assert!(links[0]["url"].as_str().unwrap().contains("+14155552671"));
    }

    #[test]
    fn test_every_category_has_links() {
        for result in [
            phone_links("1"),
            email_links("a@b.c"),
            ip_links("8.8.8.8"),
            domain_links("example.com"),
            username_links("johndoe"),
        ] {
            assert!(result.success);
            assert!(result.data.unwrap()["links"].as_array().unwrap().len() >= 6);
        }
    }
}
