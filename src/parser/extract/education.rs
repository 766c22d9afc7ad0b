use serde::Serialize;

use crate::parser::patterns::{DEGREES, EDUCATION_YEARS, INSTITUTIONS, PARAGRAPH_BREAK};

use super::first_match;

pub const UNSPECIFIED_DEGREE: &str = "Unspecified Degree";
pub const UNSPECIFIED_INSTITUTION: &str = "Unspecified Institution";
pub const UNKNOWN_DATE: &str = "Unknown Date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub date: String,
}

/// One entry per blank-line-separated paragraph naming a degree or an institution.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    PARAGRAPH_BREAK
        .split(text)
        .filter_map(parse_paragraph)
        .collect()
}

fn parse_paragraph(paragraph: &str) -> Option<EducationEntry> {
    let paragraph = paragraph.trim();
    let degree = first_match(&DEGREES, paragraph);
    let institution = first_match(&INSTITUTIONS, paragraph);
    if degree.is_none() && institution.is_none() {
        return None;
    }

    let date = EDUCATION_YEARS
        .captures(paragraph)
        .map(|c| format!("{}-{}", &c[1], &c[2]));

    Some(EducationEntry {
        degree: degree.unwrap_or_else(|| UNSPECIFIED_DEGREE.to_string()),
        institution: institution.unwrap_or_else(|| UNSPECIFIED_INSTITUTION.to_string()),
        date: date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_institution_and_years() {
        let e = extract_education("Master of Science in Computing, Tech University, 2015-2017");
        assert_eq!(
            e,
            vec![EducationEntry {
                degree: "Master of Science".into(),
                institution: "Tech University".into(),
                date: "2015-2017".into(),
            }]
        );
    }

    #[test]
    fn one_entry_per_paragraph() {
        let text = "Bachelor of Arts\nState College\n2008 – 2012\n\n  \nPhD in Physics\nResearch Institute\n2013 - Present";
        let e = extract_education(text);
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].degree, "Bachelor of Arts");
        assert_eq!(e[0].institution, "State College");
        assert_eq!(e[0].date, "2008-2012");
        assert_eq!(e[1].degree, "PhD");
        assert_eq!(e[1].institution, "Research Institute");
        assert_eq!(e[1].date, "2013-Present");
    }

    #[test]
    fn spanish_prefix_institution() {
        let e = extract_education("Ingeniería Civil Industrial\nUniversidad de Chile, 2010 a 2015");
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].degree, UNSPECIFIED_DEGREE);
        assert_eq!(e[0].institution, "Universidad de Chile");
        assert_eq!(e[0].date, "2010-2015");
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let e = extract_education("MBA");
        assert_eq!(e[0].institution, UNSPECIFIED_INSTITUTION);
        assert_eq!(e[0].date, UNKNOWN_DATE);
    }

    #[test]
    fn paragraphs_without_degree_or_institution_are_skipped() {
        assert!(extract_education("Fluent in English\n\nVolunteer 2019-2020").is_empty());
        assert!(extract_education("").is_empty());
    }
}
