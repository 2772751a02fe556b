//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for consult results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the synthesized summary (default)
    #[default]
    Summary,
    /// Summary followed by every provider's answer
    Full,
    /// JSON output
    Json,
}
