// Shared test helpers for building CSV inputs and run configurations.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use company_match::{Config, ReconConfig};

/// Header row shared by the internal fixtures.
pub const INTERNAL_HEADERS: &str = "company_number,company_name,website,sic_codes";

/// Header row shared by the external fixtures.
pub const EXTERNAL_HEADERS: &str = "company_number,website,sic_codes";

/// Writes `rows` under `header` to `dir/name` and returns the path.
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from(header);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(&path, contents).expect("Failed to write test CSV");
    path
}

/// Config pointing at the two inputs with default column mapping.
#[allow(dead_code)] // Used by other test files
pub fn config_for(internal: PathBuf, external: PathBuf) -> Config {
    Config {
        internal,
        external,
        recon: ReconConfig::default(),
        ..Default::default()
    }
}

/// Internal and external fixtures from the documented end-to-end scenario.
///
/// 001 matches on website (scheme and `www.` differences) and exactly on SIC,
/// 002 has no website on either side and shares only an SIC prefix,
/// 003 has no external counterpart.
#[allow(dead_code)] // Used by other test files
pub fn scenario(dir: &Path) -> (PathBuf, PathBuf) {
    let internal = write_csv(
        dir,
        "internal.csv",
        INTERNAL_HEADERS,
        &[
            "001,Acme Ltd,http://www.acme.com,\"A_1,B_2\"",
            "002,Beta Ltd,,C_3",
            "003,Gamma Ltd,gamma.com,D_4",
        ],
    );
    let external = write_csv(
        dir,
        "external.csv",
        EXTERNAL_HEADERS,
        &["001,acme.com,B_2", "002,,C_9"],
    );
    (internal, external)
}
