//! Configuration constants.
//!
//! Default column names, labels and separators used when a recon config
//! leaves a value unset.

// Column names (both sides of the join)
pub const DEFAULT_REG_NUMBER_COLUMN: &str = "company_number";
pub const DEFAULT_WEBSITE_COLUMN: &str = "website";
pub const DEFAULT_CODES_COLUMN: &str = "sic_codes";
/// Company name column on the internal side. Optional in the data.
pub const DEFAULT_NAME_COLUMN: &str = "company_name";

/// Appended to an external column name that collides with an internal one.
pub const DEFAULT_COLLISION_SUFFIX: &str = "_ext";

/// Separator between classification codes in a plain (non-list) cell.
pub const DEFAULT_CODE_DELIMITER: char = ',';

/// Characters that wrap stringified list literals and their items.
pub const CODE_WRAPPER_CHARS: &[char] = &['[', ']', '\'', '"'];

// Default summary views
pub const ALL_RECORDS_LABEL: &str = "All Records";
pub const WEBSITE_MATCHES_LABEL: &str = "Website Matches Only";

/// Default recon name when the config omits one.
pub const DEFAULT_RECON_NAME: &str = "company reconciliation";

// Output column names for the derived flags
pub const WEBSITE_MATCH_COLUMN: &str = "website_match";
pub const SUB_SIC_MATCH_COLUMN: &str = "sub_sic_match";
pub const PARTIAL_MATCH_COLUMN: &str = "partial_match";
