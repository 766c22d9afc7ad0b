use crate::parser::patterns::{EMAIL, GITHUB, LINKEDIN, PHONES, WEBSITE, WEBSITE_EXCLUDED_HOSTS};

use super::first_match;

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    first_match(&PHONES, text)
}

pub fn extract_linkedin(text: &str) -> Option<String> {
    first_match(&LINKEDIN, text)
}

pub fn extract_github(text: &str) -> Option<String> {
    first_match(&GITHUB, text)
}

/// First http(s) URL that is not a profile or social-network link.
pub fn extract_website(text: &str) -> Option<String> {
    WEBSITE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| !is_excluded(&host(url)))
        .map(str::to_string)
}

fn host(url: &str) -> String {
    url.split("//")
        .nth(1)
        .unwrap_or(url)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .trim_start_matches("www.")
        .to_ascii_lowercase()
}

fn is_excluded(host: &str) -> bool {
    WEBSITE_EXCLUDED_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{h}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_at_sign() {
        assert_eq!(
            extract_email("Contact: jane.doe+cv@mail.example.org today").as_deref(),
            Some("jane.doe+cv@mail.example.org")
        );
        assert_eq!(extract_email("jane at example dot com"), None);
    }

    #[test]
    fn phone_shapes_in_priority_order() {
        assert_eq!(extract_phone("Tel: +1 (555) 123-4567").as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(extract_phone("Cel: 555.987.6543").as_deref(), Some("555.987.6543"));
        assert_eq!(extract_phone("no digits here"), None);
    }

    #[test]
    fn profile_links() {
        let text = "https://www.linkedin.com/in/jane-doe/ | https://github.com/janedoe";
        assert_eq!(extract_linkedin(text).as_deref(), Some("linkedin.com/in/jane-doe/"));
        assert_eq!(extract_github(text).as_deref(), Some("github.com/janedoe"));
        assert_eq!(extract_linkedin("linkedin.com/profile/jdoe").as_deref(), Some("linkedin.com/profile/jdoe"));
    }

    #[test]
    fn website_skips_social_hosts() {
        let text = "https://linkedin.com/in/jd https://twitter.com/jd https://jane.dev/blog";
        assert_eq!(extract_website(text).as_deref(), Some("https://jane.dev/blog"));
        assert_eq!(extract_website("https://www.github.com/jd"), None);
    }

    #[test]
    fn website_keeps_lookalike_hosts() {
        assert_eq!(
            extract_website("http://notgithub.company.io").as_deref(),
            Some("http://notgithub.company.io")
        );
    }
}
