use hn_core::{Article, NotificationPayload};

/// Title used when a hit has neither its own title nor a story title.
pub const FALLBACK_TITLE: &str = "New HN mobile article";

/// Keyword-matching predicate for notification filtering. True iff any
/// filter keyword is a case-insensitive substring of the title (falling
/// back to the story title) concatenated with the story URL. An empty
/// filter set matches nothing.
pub fn matches(article: &Article, filters: &[String]) -> bool {
    let title = article
        .title
        .as_deref()
        .or(article.story_title.as_deref())
        .unwrap_or("");
    let url = article.story_url.as_deref().unwrap_or("");
    let haystack = format!("{} {}", title.to_lowercase(), url.to_lowercase());
    filters
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

pub fn payload_for(article: &Article) -> NotificationPayload {
    NotificationPayload {
        title: article
            .title
            .clone()
            .or_else(|| article.story_title.clone())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        body: format!("By {}", article.author),
        url: article.story_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::article;

    fn filters(keywords: &[&str]) -> Vec<String> {
        keywords.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn matches_keyword_in_title_case_insensitively() {
        let a = article("1", "Android 15 beta released", 0);
        assert!(matches(&a, &filters(&["android"])));
        assert!(!matches(&a, &filters(&["rust"])));
    }

    #[test]
    fn empty_filter_set_matches_nothing() {
        let a = article("1", "Android 15 beta released", 0);
        assert!(!matches(&a, &[]));
    }

    #[test]
    fn matches_keyword_in_story_url() {
        let mut a = article("1", "Weekly digest", 0);
        a.story_url = Some("https://example.com/ios-release".to_string());
        assert!(matches(&a, &filters(&["ios"])));
    }

    #[test]
    fn falls_back_to_story_title_when_title_missing() {
        let mut a = article("1", "ignored", 0);
        a.title = None;
        a.story_title = Some("Kotlin multiplatform update".to_string());
        assert!(matches(&a, &filters(&["kotlin"])));
    }

    #[test]
    fn payload_carries_author_and_optional_url() {
        let mut a = article("1", "Some title", 0);
        a.story_url = Some("https://example.com".to_string());
        let payload = payload_for(&a);
        assert_eq!(payload.title, "Some title");
        assert_eq!(payload.body, "By tester");
        assert_eq!(payload.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn payload_title_falls_back_when_both_titles_missing() {
        let mut a = article("1", "ignored", 0);
        a.title = None;
        a.story_title = None;
        assert_eq!(payload_for(&a).title, FALLBACK_TITLE);
    }
}
