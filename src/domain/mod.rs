//! Domain extraction and normalization utilities.
//!
//! This module turns the website strings found in company datasets (full URLs,
//! bare hosts, hosts with ports, doubled `www.` prefixes) into a canonical
//! domain that can be compared across sources.
//!
//! Key functions:
//! - `normalize_domain()` - Canonicalizes a URL or host string
//! - `decompose_host()` - Splits a host into subdomain, domain and public suffix
//!
//! Public suffixes come from the ICANN section of the Public Suffix List via
//! `psl`. Private-section entries (`github.io`, `uk.com`, ...) are resolved to
//! their ICANN parent so that `acme.uk.com` decomposes as domain `uk`,
//! suffix `com`.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

/// `:PORT` followed by the end of the authority.
static PORT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\d+(?:[/?#]|$)").expect("port marker pattern is valid"));

/// A host split at its public-suffix boundary.
///
/// `www.shop.example.co.uk` decomposes to subdomain `www.shop`, domain
/// `example`, suffix `co.uk`. Unknown TLDs give an empty suffix with the last
/// label as domain. All parts are lower-case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl HostParts {
    /// Joins the non-empty labels given, in order, with dots.
    fn join(labels: &[&str]) -> String {
        labels
            .iter()
            .filter(|l| !l.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `domain.suffix`, the registrable domain.
    pub fn registrable(&self) -> String {
        Self::join(&[&self.domain, &self.suffix])
    }

    /// `subdomain.domain.suffix`, the full host.
    pub fn full(&self) -> String {
        Self::join(&[&self.subdomain, &self.domain, &self.suffix])
    }
}

/// Normalizes a website string into a canonical domain.
///
/// Best-effort heuristic: it never fails and always returns a string, which
/// may be empty or meaningless for degenerate input.
///
/// # Rules
///
/// 1. An explicit port (`:443`) and everything after it is dropped.
/// 2. The host is the network location of the parsed URL, or the bare host
///    prefix when the string has no scheme.
/// 3. Evaluated in order:
///    - host has `www.` but the detected suffix does not occur in it:
///      `<host>.<suffix>`
///    - host has `www.` and ends with the suffix: one trailing `.<suffix>` and
///      one leading `www.` are removed, then the suffix is re-appended
///    - the string had a network location: the host unchanged
///    - suffix split produced domain `uk` and suffix `com`: the full host
///    - no known public suffix: the full host
///    - otherwise: `<domain>.<suffix>`
/// 4. A leading `www.www.` collapses to `www.`.
///
/// # Examples
///
/// ```
/// use company_match::domain::normalize_domain;
///
/// assert_eq!(normalize_domain("https://www.example.com:443/path"), "example.com");
/// assert_eq!(normalize_domain("www.example.co.uk"), "example.co.uk");
/// assert_eq!(normalize_domain("sub.example.co.uk"), "example.co.uk");
/// assert_eq!(normalize_domain("www.www.example.com"), "www.example.com");
/// ```
pub fn normalize_domain(raw: &str) -> String {
    let truncated = strip_port(raw.trim());
    let netloc = network_location(truncated);
    let parts = decompose_host(&bare_host(truncated));

    let host = if netloc.is_empty() {
        bare_host(truncated)
    } else {
        netloc.clone()
    };
    let suffix = parts.suffix.as_str();

    let candidate = if host.contains("www.") && !host.contains(suffix) {
        format!("{host}.{suffix}")
    } else if host.contains("www.") && host.ends_with(suffix) {
        strip_www_around_suffix(&host, suffix)
    } else if !netloc.is_empty() {
        netloc
    } else if parts.domain == "uk" && parts.suffix == "com" {
        parts.full()
    } else if parts.suffix.is_empty() {
        // No public suffix to delimit against (unknown TLD, IP address)
        parts.full()
    } else {
        parts.registrable()
    };

    collapse_www(candidate)
}

/// Splits a lower-case host into subdomain, registrable label and ICANN
/// public suffix.
pub fn decompose_host(host: &str) -> HostParts {
    if host.is_empty() {
        return HostParts::default();
    }
    if host.parse::<Ipv4Addr>().is_ok() {
        return HostParts {
            domain: host.to_string(),
            ..HostParts::default()
        };
    }

    let suffix = icann_suffix(host).unwrap_or("");
    let rest = if suffix.is_empty() {
        host
    } else {
        host.strip_suffix(suffix)
            .and_then(|r| r.strip_suffix('.'))
            .unwrap_or("")
    };

    let (subdomain, domain) = rest.rsplit_once('.').unwrap_or(("", rest));
    HostParts {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.to_string(),
    }
}

/// Drops an explicit port and everything after it.
fn strip_port(url: &str) -> &str {
    match PORT_MARKER.find(url) {
        Some(m) => &url[..m.start()],
        None => url,
    }
}

/// Host of the string parsed as an absolute URL; empty when it does not
/// parse or carries no host.
fn network_location(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.trim_matches('.').to_string()))
        .unwrap_or_default()
}

/// Host-like prefix of a possibly scheme-less string, lower-cased.
fn bare_host(url: &str) -> String {
    let rest = strip_scheme(url);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority
        .rsplit_once('@')
        .map(|(_, h)| h)
        .unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    host.trim().trim_matches('.').to_lowercase()
}

/// Removes `scheme://` (or a leading `//`) when present.
fn strip_scheme(url: &str) -> &str {
    if let Some((scheme, rest)) = url.split_once("://") {
        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            return rest;
        }
    }
    url.strip_prefix("//").unwrap_or(url)
}

/// ICANN public suffix of `host`, climbing out of private-section entries.
fn icann_suffix(host: &str) -> Option<&str> {
    let mut name = host;
    loop {
        let suffix = psl::suffix(name.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }
        let len = suffix.as_bytes().len();
        let text = host.get(host.len().checked_sub(len)?..)?;
        match suffix.typ() {
            Some(psl::Type::Private) => {
                let (_, parent) = text.split_once('.')?;
                name = parent;
            }
            _ => return Some(text),
        }
    }
}

/// Removes the last `.<suffix>` and a leading `www.`, then re-appends the suffix.
fn strip_www_around_suffix(host: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return host.strip_prefix("www.").unwrap_or(host).to_string();
    }

    let dotted = format!(".{suffix}");
    let remainder = match host.rfind(&dotted) {
        Some(i) => format!("{}{}", &host[..i], &host[i + dotted.len()..]),
        None => host.to_string(),
    };
    let remainder = remainder.strip_prefix("www.").unwrap_or(&remainder);
    format!("{remainder}.{suffix}")
}

fn collapse_www(mut domain: String) -> String {
    while domain.starts_with("www.www.") {
        domain.replace_range(..8, "www.");
    }
    domain
}
