use serde::{Deserialize, Serialize};
use std::fmt;

/// Which path produced a [`SummaryResult`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrigin {
    /// Provider JSON decoded cleanly.
    Remote,
    /// Provider answered with something that was not JSON; its text became
    /// the summary.
    RemoteRaw,
    /// Local sentence/frequency fallback.
    Local,
}

impl fmt::Display for SummaryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SummaryOrigin::Remote => "remote",
            SummaryOrigin::RemoteRaw => "remote_raw",
            SummaryOrigin::Local => "local",
        })
    }
}

/// Summary text plus keywords, most relevant first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub keywords: Vec<String>,
    pub origin: SummaryOrigin,
}

impl SummaryResult {
    /// `true` when there is neither summary text nor a keyword.
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.keywords.is_empty()
    }
}
