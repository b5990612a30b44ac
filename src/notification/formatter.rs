//! Message formatting for GitHub notifications
//!
//! ```text
//! Title:  🔀 PullRequest: octo/app
//! Body:   **REVIEW REQUESTED**
//!         Add retry budget
//! ```

use super::channel::{PushMessage, ViewAction};
use super::classifier::classify;
use crate::config::GITHUB_ICON_URL;

/// `review_requested` -> `REVIEW REQUESTED`
pub fn display_reason(reason: &str) -> String {
    reason.replace('_', " ").to_uppercase()
}

/// Bold reason label followed by the subject title
pub fn format_body(reason: &str, title: &str) -> String {
    format!("**{}**\n{}", display_reason(reason), title)
}

pub fn format_title(emoji: &str, subject_type: &str, repository: &str) -> String {
    format!("{} {}: {}", emoji, subject_type, repository)
}

/// Build the full push message for one notification
pub fn build_push_message(
    repository: &str,
    title: &str,
    subject_type: &str,
    reason: &str,
    url: &str,
) -> PushMessage {
    let presentation = classify(subject_type, reason);

    PushMessage {
        title: format_title(presentation.emoji, subject_type, repository),
        body: format_body(reason, title),
        tags: presentation.tags.iter().map(|t| t.to_string()).collect(),
        priority: presentation.priority,
        click: url.to_string(),
        icon: GITHUB_ICON_URL.to_string(),
        actions: vec![ViewAction::open_on_github(url)],
    }
}
