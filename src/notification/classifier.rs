//! Subject type + reason -> tags, priority, emoji
//!
//! The subject type picks a base row from a fixed table; the reason is then
//! layered on top. A matching reason always overwrites the priority, even when
//! the type already had a higher one.

use super::priority::Priority;

/// Presentation metadata for one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// ntfy tags (emoji shortcodes or plain labels), in display order
    pub tags: Vec<&'static str>,
    pub priority: Priority,
    pub emoji: &'static str,
}

impl Presentation {
    /// Comma-joined form for the `Tags` header
    pub fn tags_header(&self) -> String {
        self.tags.join(",")
    }
}

fn base_for_type(subject_type: &str) -> Presentation {
    let (tags, priority, emoji) = match subject_type {
        "PullRequest" => (vec!["git", "pull_request"], Priority::High, "🔀"),
        "Issue" => (vec!["memo", "issue"], Priority::Default, "📌"),
        "Release" => (vec!["package", "shipit"], Priority::Max, "📦"),
        "RepositoryVulnerabilityAlert" => (vec!["rotating_light", "security"], Priority::Max, "🚨"),
        "CheckSuite" => (vec!["x", "no_entry"], Priority::High, "❌"),
        "Discussion" => (vec!["speech_balloon"], Priority::Default, "💬"),
        "Commit" => (vec!["computer", "pencil2"], Priority::Low, "💻"),
        _ => (vec!["bell"], Priority::Default, "🔔"),
    };

    Presentation {
        tags,
        priority,
        emoji,
    }
}

/// Classify a notification by subject type and reason
pub fn classify(subject_type: &str, reason: &str) -> Presentation {
    let mut presentation = base_for_type(subject_type);

    match reason {
        "mention" => {
            presentation.tags.push("loudspeaker");
            presentation.priority = Priority::Max;
        }
        "review_requested" => {
            presentation.tags.push("eyes");
            presentation.priority = Priority::High;
        }
        _ => {}
    }

    presentation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_table() {
        let cases = [
            ("PullRequest", "git,pull_request", Priority::High, "🔀"),
            ("Issue", "memo,issue", Priority::Default, "📌"),
            ("Release", "package,shipit", Priority::Max, "📦"),
            ("RepositoryVulnerabilityAlert", "rotating_light,security", Priority::Max, "🚨"),
            ("CheckSuite", "x,no_entry", Priority::High, "❌"),
            ("Discussion", "speech_balloon", Priority::Default, "💬"),
            ("Commit", "computer,pencil2", Priority::Low, "💻"),
        ];

        for (kind, tags, priority, emoji) in cases {
            let p = classify(kind, "subscribed");
            assert_eq!(p.tags_header(), tags, "tags for {kind}");
            assert_eq!(p.priority, priority, "priority for {kind}");
            assert_eq!(p.emoji, emoji, "emoji for {kind}");
        }
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let p = classify("RepositoryDependabotAlertsThread", "");
        assert_eq!(p.tags, vec!["bell"]);
        assert_eq!(p.priority, Priority::Default);
        assert_eq!(p.emoji, "🔔");
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        assert_eq!(classify("pullrequest", "").emoji, "🔔");
    }

    #[test]
    fn test_mention_on_pull_request() {
        let p = classify("PullRequest", "mention");
        assert_eq!(p.priority, Priority::Max);
        assert!(p.tags.contains(&"git"));
        assert!(p.tags.contains(&"pull_request"));
        assert!(p.tags.contains(&"loudspeaker"));
        assert_eq!(p.tags_header(), "git,pull_request,loudspeaker");
    }

    #[test]
    fn test_review_requested_escalates() {
        let p = classify("Issue", "review_requested");
        assert_eq!(p.priority, Priority::High);
        assert_eq!(p.tags_header(), "memo,issue,eyes");
    }

    #[test]
    fn test_review_requested_overrides_higher_base() {
        // Release is MAX by type, the reason still sets HIGH
        let p = classify("Release", "review_requested");
        assert_eq!(p.priority, Priority::High);
        assert_eq!(p.emoji, "📦");
    }

    #[test]
    fn test_other_reasons_do_not_augment() {
        for reason in ["subscribed", "author", "team_mention", "state_change", ""] {
            assert_eq!(classify("Commit", reason), classify("Commit", "subscribed"));
        }
    }

    #[test]
    fn test_classify_is_pure() {
        assert_eq!(classify("PullRequest", "mention"), classify("PullRequest", "mention"));
        assert_eq!(classify("Unknown", "x"), classify("Unknown", "x"));
    }
}
