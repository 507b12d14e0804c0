use crate::error::{Result, ScanError};
use crate::extract::{collect_hrefs, filter_children};
use crate::marker::{DEFAULT_MARKER, contains_hex32};
use crate::report::{BranchFailure, ScrapeReport};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// What to do when a branch fails mid-walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the whole run on the first transport failure. No partial
    /// results: a single broken node invalidates a "complete" sweep.
    FailFast,
    /// Record the failing branch in the report, skip its subtree, and
    /// continue with the siblings.
    Isolate,
}

/// Sequential depth-first walker over an HTTP directory-listing tree.
///
/// One outstanding request at a time: every directory page is fetched,
/// inspected for the marker file, and its children pushed onto an explicit
/// work-list. A visited set keyed on the constructed URL guarantees no URL
/// is fetched twice, even if the server's tree contains back-references.
pub struct Walker {
    client: Client,
    marker: String,
    policy: ErrorPolicy,
    progress_callback: Option<ProgressCallback>,
}

impl Walker {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("hexhound/0.1 (https://github.com/trapdoorsec/hexhound)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            marker: DEFAULT_MARKER.to_string(),
            policy: ErrorPolicy::FailFast,
            progress_callback: None,
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk every directory reachable from `seeds`, depth-first, visiting
    /// each URL at most once, and return the accumulated report.
    pub async fn walk(&self, seeds: &[String]) -> Result<ScrapeReport> {
        for seed in seeds {
            Url::parse(seed).map_err(|e| ScanError::InvalidUrl(format!("{seed}: {e}")))?;
        }

        info!("starting walk over {} seed(s)", seeds.len());

        let mut report = ScrapeReport::new();
        let mut visited: HashSet<String> = HashSet::new();
        // Children are pushed in reverse so the first entry of a listing is
        // the next URL popped: depth-first in document order.
        let mut frontier: Vec<String> = seeds.iter().rev().cloned().collect();

        while let Some(url) = frontier.pop() {
            if !visited.insert(url.clone()) {
                debug!("already visited {url}, skipping");
                continue;
            }

            let hrefs = match self.fetch_listing(&url).await {
                Ok(hrefs) => hrefs,
                Err(e) => match self.policy {
                    ErrorPolicy::FailFast => return Err(e),
                    ErrorPolicy::Isolate => {
                        warn!("skipping branch {url}: {e}");
                        report.failures.push(BranchFailure {
                            url,
                            error: e.to_string(),
                        });
                        continue;
                    }
                },
            };

            report.directories_visited += 1;
            if let Some(ref callback) = self.progress_callback {
                callback(report.directories_visited, url.clone());
            }

            match self.fetch_marker(&url, &hrefs).await {
                Ok(Some(text)) if !text.is_empty() => {
                    report.markers_found += 1;
                    if contains_hex32(&text) {
                        info!("digest-like marker content under {url}");
                        report.matches.push(text.trim().to_string());
                    }
                }
                Ok(_) => {}
                Err(e) => match self.policy {
                    ErrorPolicy::FailFast => return Err(e),
                    ErrorPolicy::Isolate => {
                        // The listing itself came back, so the children are
                        // still worth descending into.
                        warn!("marker fetch failed under {url}: {e}");
                        report.failures.push(BranchFailure {
                            url: url.clone(),
                            error: e.to_string(),
                        });
                    }
                },
            }

            let children = filter_children(&url, &hrefs, &self.marker);
            debug!("{} children under {url}", children.len());
            for child in children.into_iter().rev() {
                if !visited.contains(&child) {
                    frontier.push(child);
                }
            }
        }

        info!(
            "walk complete. visited {} directories, {} marker file(s), {} match(es)",
            report.directories_visited,
            report.markers_found,
            report.matches.len()
        );
        Ok(report)
    }

    async fn fetch_listing(&self, url: &str) -> Result<Vec<String>> {
        debug!("fetching listing {url}");
        let response = self.client.get(url).send().await?;
        // text() consumes the body fully, releasing the connection on
        // every path.
        let body = response.text().await?;
        Ok(collect_hrefs(&body))
    }

    /// One marker fetch per directory, and only when the listing actually
    /// advertises the marker file.
    async fn fetch_marker(&self, dir_url: &str, hrefs: &[String]) -> Result<Option<String>> {
        if !hrefs.iter().any(|href| href == &self.marker) {
            return Ok(None);
        }

        let marker_url = format!("{dir_url}{}", self.marker);
        debug!("fetching marker {marker_url}");
        let response = self.client.get(&marker_url).send().await?;
        let text = response.text().await?;
        Ok(Some(text))
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}
