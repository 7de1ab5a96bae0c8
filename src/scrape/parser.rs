//! HTML extraction of reviewer usernames
//!
//! The listing marks each reviewer with a `<div class="username">` wrapping a
//! link to the profile; the link text is the username. This is the only markup
//! the scraper depends on.

use scraper::{Html, Selector};

/// Selector for username containers
const USERNAME_CONTAINER: &str = "div.username";

/// Selector for the profile link inside a container
const USERNAME_LINK: &str = "a";

/// Usernames found on one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedListing {
    /// Usernames in document order
    pub usernames: Vec<String>,

    /// Containers skipped because they had no link or an empty one
    pub skipped: usize,
}

/// Parses a listing page
///
/// # Example
///
/// ```
/// use reviewer_scrape::scrape::parse_listing;
///
/// let html = r#"<div class="username"><a href="/user/alice">alice</a></div>
///               <div class="username"></div>"#;
/// let parsed = parse_listing(html);
/// assert_eq!(parsed.usernames, vec!["alice".to_string()]);
/// assert_eq!(parsed.skipped, 1);
/// ```
pub fn parse_listing(html: &str) -> ParsedListing {
    let document = Html::parse_document(html);
    let mut parsed = ParsedListing::default();

    let (Ok(container_selector), Ok(link_selector)) = (
        Selector::parse(USERNAME_CONTAINER),
        Selector::parse(USERNAME_LINK),
    ) else {
        return parsed;
    };

    for container in document.select(&container_selector) {
        let username = container
            .select(&link_selector)
            .next()
            .map(|link| link.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        match username {
            Some(username) => parsed.usernames.push(username),
            None => parsed.skipped += 1,
        }
    }

    parsed
}

/// Extracts reviewer usernames from a listing page, in document order
///
/// Containers without a link, or whose link text is blank, are skipped silently.
pub fn extract_usernames(html: &str) -> Vec<String> {
    parse_listing(html).usernames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_username() {
        let html = r#"<html><body><div class="username"><a href="/user/Alice">Alice</a></div></body></html>"#;
        assert_eq!(extract_usernames(html), vec!["Alice".to_string()]);
    }

    #[test]
    fn test_container_without_link_is_skipped() {
        let html = r#"
            <html><body>
                <div class="username"><a href="/user/Alice">Alice</a></div>
                <div class="username">no link here</div>
            </body></html>
        "#;
        let parsed = parse_listing(html);
        assert_eq!(parsed.usernames, vec!["Alice".to_string()]);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_document_order_preserved() {
        let html = r#"
            <table>
                <tr><td><div class="username"><a href="/user/zed">zed</a></div></td></tr>
                <tr><td><div class="username"><a href="/user/amy">amy</a></div></td></tr>
                <tr><td><div class="username"><a href="/user/mo">mo</a></div></td></tr>
            </table>
        "#;
        assert_eq!(
            extract_usernames(html),
            vec!["zed".to_string(), "amy".to_string(), "mo".to_string()]
        );
    }

    #[test]
    fn test_only_first_link_used() {
        let html = r#"<div class="username"><a href="/user/first">first</a><a href="/x">second</a></div>"#;
        assert_eq!(extract_usernames(html), vec!["first".to_string()]);
    }

    #[test]
    fn test_link_text_is_trimmed() {
        let html = "<div class=\"username\"><a href=\"/user/bob\">\n   bob  \n</a></div>";
        assert_eq!(extract_usernames(html), vec!["bob".to_string()]);
    }

    #[test]
    fn test_nested_markup_in_link() {
        let html = r#"<div class="username"><a href="/user/carol"><span>car</span>ol</a></div>"#;
        assert_eq!(extract_usernames(html), vec!["carol".to_string()]);
    }

    #[test]
    fn test_empty_link_is_skipped() {
        let html = r#"<div class="username"><a href="/user/"> </a></div>"#;
        let parsed = parse_listing(html);
        assert!(parsed.usernames.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_blank_anchor_never_becomes_empty_username() {
        let html = r#"
            <div class="username"><a href="/user/">  </a></div>
            <div class="username"><a href="/user/bob"> bob </a></div>
        "#;
        let parsed = parse_listing(html);
        assert_eq!(parsed.usernames, vec!["bob".to_string()]);
        assert!(!parsed.usernames.iter().any(|u| u.is_empty()));
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_multiple_classes_match() {
        let html = r#"<div class="avatar username"><a href="/user/dan">dan</a></div>"#;
        assert_eq!(extract_usernames(html), vec!["dan".to_string()]);
    }

    #[test]
    fn test_other_elements_ignored() {
        let html = r#"
            <span class="username"><a href="/user/nope">nope</a></span>
            <div class="user-name"><a href="/user/nope2">nope2</a></div>
            <a href="/user/loose">loose</a>
        "#;
        assert!(extract_usernames(html).is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let html = r#"
            <div class="username"><a>eve</a></div>
            <div class="username"><a>eve</a></div>
        "#;
        assert_eq!(extract_usernames(html).len(), 2);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_listing(""), ParsedListing::default());
    }
}
