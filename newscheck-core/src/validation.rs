//! Input validation run at the request boundary, before any upstream call

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::NewsCheckError;

/// Shortest claim text accepted for verification (in characters)
pub const MIN_CLAIM_LENGTH: usize = 10;

/// Accept only absolute http(s) URLs whose host is publicly routable.
///
/// The article is fetched server-side, so loopback, private, link-local and
/// unspecified addresses (and `localhost`) are refused.
pub fn validate_article_url(raw: &str) -> Result<Url, NewsCheckError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| NewsCheckError::validation(format!("Please enter a valid URL ({})", e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(NewsCheckError::validation(
            "Please enter a valid http(s) URL",
        ));
    }

    if !is_public_host(&url) {
        return Err(NewsCheckError::validation(
            "Please enter the URL of a public website",
        ));
    }

    Ok(url)
}

/// Whether `url` names a host outside loopback, private, link-local and unspecified ranges.
///
/// Only literal addresses and `localhost` names are checked; names are not resolved.
pub fn is_public_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(name)) => {
            let name = name.trim_end_matches('.').to_ascii_lowercase();
            name != "localhost" && !name.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_public_ipv6(ip),
        None => false,
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    // 100.64.0.0/10 carrier-grade NAT
    let shared = a == 100 && (64..128).contains(&b);
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || shared)
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_public_ipv4(v4);
    }
    let first = ip.segments()[0];
    // fc00::/7 unique local, fe80::/10 link-local
    let unique_local = first & 0xfe00 == 0xfc00;
    let link_local = first & 0xffc0 == 0xfe80;
    !(ip.is_loopback() || ip.is_unspecified() || unique_local || link_local)
}

/// Trim the claim and enforce the minimum length
pub fn validate_claim_text(raw: &str) -> Result<String, NewsCheckError> {
    let text = raw.trim();
    if text.chars().count() < MIN_CLAIM_LENGTH {
        return Err(NewsCheckError::validation(format!(
            "Please enter text to verify (at least {} characters)",
            MIN_CLAIM_LENGTH
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_article_url("https://www.bbc.com/news/world-123").is_ok());
        assert!(validate_article_url("  http://example.com  ").is_ok());
    }

    #[test]
    fn test_invalid_urls() {
        assert!(validate_article_url("not a url").is_err());
        assert!(validate_article_url("ftp://example.com/file").is_err());
        assert!(validate_article_url("mailto:someone@example.com").is_err());
        assert!(validate_article_url("").unwrap_err().is_validation());
    }

    #[test]
    fn test_internal_hosts_are_refused() {
        for raw in [
            "http://127.0.0.1:8080/internal/secret",
            "http://169.254.169.254/latest/meta-data/",
            "http://10.0.0.5/admin",
            "http://192.168.1.1/",
            "http://172.16.0.1/",
            "http://100.64.0.1/",
            "http://0.0.0.0/",
            "http://localhost:3000/",
            "http://api.localhost/",
            "http://[::1]/",
            "http://[fd00::1]/",
            "http://[fe80::1]/",
            "http://[::ffff:127.0.0.1]/",
            "http://2130706433/",
        ] {
            let err = validate_article_url(raw).unwrap_err();
            assert!(err.is_validation(), "{raw}");
        }
    }

    #[test]
    fn test_public_hosts_are_accepted() {
        for raw in [
            "https://www.bbc.com/arabic",
            "http://93.184.216.34/story",
            "http://[2606:2800:220:1:248:1893:25c8:1946]/",
            "http://172.32.0.1/",
        ] {
            assert!(validate_article_url(raw).is_ok(), "{raw}");
        }
    }

    #[test]
    fn test_claim_length_floor() {
        assert_eq!(
            validate_claim_text("  The earth is flat ").unwrap(),
            "The earth is flat"
        );
        assert!(validate_claim_text("too short").is_err());
        // counted in characters, not bytes
        assert!(validate_claim_text("الأرض مسطحة").is_ok());
    }
}
