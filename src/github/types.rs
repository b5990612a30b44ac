//! GitHub notification thread records (`GET /notifications`)

use serde::Deserialize;

/// One notification thread as returned by the API
///
/// Only the fields the bridge reads are modelled; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubNotification {
    /// Thread id, stable across updates
    pub id: String,
    /// Last update timestamp, changes whenever the thread gets new activity
    pub updated_at: String,
    /// Why the user was notified (`mention`, `review_requested`, `subscribed`, ...)
    pub reason: String,
    pub repository: Repository,
    pub subject: Subject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subject {
    pub title: String,
    /// `PullRequest`, `Issue`, `Release`, `CheckSuite`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// API URL of the subject; null for some types (e.g. discussions, check suites)
    #[serde(default)]
    pub url: Option<String>,
}
