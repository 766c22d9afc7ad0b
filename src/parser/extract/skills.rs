use itertools::Itertools;

use crate::parser::patterns::SKILLS;

/// Union of every skill vocabulary, deduplicated case-insensitively.
/// Vocabularies are scanned in catalog order and the first casing seen wins.
pub fn extract_skills(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for re in SKILLS.iter() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1).or_else(|| caps.get(0)) {
                found.push(m.as_str().to_string());
            }
        }
    }
    found.into_iter().unique_by(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_across_vocabularies() {
        let skills = extract_skills("Python, React and Docker. Strong leadership.");
        assert_eq!(skills, vec!["Python", "React", "Docker", "leadership"]);
    }

    #[test]
    fn dedups_case_insensitively_first_casing_wins() {
        let skills = extract_skills("python scripts, later Python services, PYTHON tooling");
        assert_eq!(skills, vec!["python"]);
    }

    #[test]
    fn short_tokens_are_case_sensitive() {
        assert_eq!(extract_skills("Go and R"), vec!["Go", "R"]);
        assert!(extract_skills("go r ago").is_empty());
    }

    #[test]
    fn c_family_tokens() {
        assert_eq!(extract_skills("C++, C# and Java"), vec!["Java", "C++", "C#"]);
        assert!(extract_skills("ABC++").is_empty());
    }

    #[test]
    fn no_partial_word_matches() {
        assert!(extract_skills("Rusty gears and javanese coffee").is_empty());
    }
}
