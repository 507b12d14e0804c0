use serde::{Deserialize, Serialize};

/// A branch that failed mid-walk and was skipped under
/// [`ErrorPolicy::Isolate`](crate::walker::ErrorPolicy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchFailure {
    pub url: String,
    pub error: String,
}

/// Accumulated outcome of one walk: every field is written by the single
/// traversal loop and returned to the caller when the tree is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub directories_visited: usize,
    pub markers_found: usize,
    pub matches: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BranchFailure>,
}

impl ScrapeReport {
    pub fn new() -> Self {
        Self {
            directories_visited: 0,
            markers_found: 0,
            matches: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl Default for ScrapeReport {
    fn default() -> Self {
        Self::new()
    }
}
