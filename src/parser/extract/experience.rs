use std::cmp::Reverse;

use serde::Serialize;
use tracing::debug;

use crate::parser::patterns::{
    COMPANY_SUFFIX, DATE_RANGES, EXPERIENCE_END_RE, EXPERIENCE_START_RE, TITLE_KEYWORD, YEAR,
};
use crate::parser::sections::{segment_sections, SectionKind, SectionMap};

pub const UNKNOWN: &str = "Unknown";

const COMPANY_MAX_TOKENS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobEntry {
    pub company: String,
    pub title: String,
    pub date: String,
    pub description: String,
}

/// Lines around one date anchor, handed to an [`EntryPolicy`].
pub struct EntryContext<'a> {
    pub lines: &'a [&'a str],
    /// Index of the line carrying the date range.
    pub anchor: usize,
    /// Exclusive end of this entry's lines.
    pub end: usize,
    pub date: &'a str,
}

impl<'a> EntryContext<'a> {
    /// Trimmed line `n` above the anchor.
    pub fn above(&self, n: usize) -> Option<&'a str> {
        self.anchor.checked_sub(n).map(|i| self.lines[i].trim())
    }

    /// Trimmed lines the entry owns, date line first.
    pub fn entry_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines[self.anchor..self.end].iter().map(|l| l.trim())
    }
}

/// How company and title are recovered from the lines around a date.
pub trait EntryPolicy {
    fn company(&self, cx: &EntryContext<'_>) -> Option<String>;
    fn title(&self, cx: &EntryContext<'_>, company: Option<&str>) -> Option<String>;
}

/// Companies and titles are capitalized lines next to the date.
pub struct CapitalizedLinePolicy;

impl EntryPolicy for CapitalizedLinePolicy {
    fn company(&self, cx: &EntryContext<'_>) -> Option<String> {
        if let Some(prev) = cx.above(1).filter(|l| starts_upper(l)) {
            return Some(prev.to_string());
        }
        cx.entry_lines()
            .take(2)
            .find(|l| !l.contains(cx.date) && is_company_line(l))
            .map(str::to_string)
    }

    fn title(&self, cx: &EntryContext<'_>, company: Option<&str>) -> Option<String> {
        let mut candidates = Vec::new();
        let prev = cx.above(1);
        let prev_is_company = prev.is_some() && prev == company;
        if prev_is_company {
            candidates.extend(cx.above(2));
        } else {
            candidates.extend(prev);
        }
        candidates.extend(
            cx.entry_lines()
                .find(|l| !l.is_empty() && !l.contains(cx.date) && Some(*l) != company),
        );
        candidates.retain(|c| !c.is_empty());

        candidates
            .iter()
            .find(|c| TITLE_KEYWORD.is_match(c))
            .or(candidates.first())
            .map(|c| c.to_string())
    }
}

fn starts_upper(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
}

/// Short capitalized lines, or longer ones carrying a legal-form suffix.
fn is_company_line(line: &str) -> bool {
    starts_upper(line)
        && (line.split_whitespace().count() <= COMPANY_MAX_TOKENS || COMPANY_SUFFIX.is_match(line))
}

// ── Locating the work history ──

type Locator = fn(&str, &SectionMap) -> Option<String>;

const LOCATORS: &[(&str, Locator)] = &[
    ("header", after_experience_header),
    ("segmenter", segmented_body),
    ("full_text", whole_text),
];

/// From the first experience header to the next major header after it.
fn after_experience_header(text: &str, _: &SectionMap) -> Option<String> {
    let start = EXPERIENCE_START_RE.find(text)?.end();
    let rest = &text[start..];
    let end = EXPERIENCE_END_RE.find(rest).map_or(rest.len(), |m| m.start());
    non_blank(&rest[..end])
}

fn segmented_body(_: &str, sections: &SectionMap) -> Option<String> {
    sections.get(SectionKind::Experience).and_then(non_blank)
}

/// Only for documents with no recognizable section headers at all.
fn whole_text(text: &str, sections: &SectionMap) -> Option<String> {
    if !sections.is_empty() {
        return None;
    }
    non_blank(text)
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ── Extraction ──

pub fn extract_work_experiences(text: &str) -> Vec<JobEntry> {
    let sections = segment_sections(text);
    extract_work_experiences_with(text, &sections, &CapitalizedLinePolicy)
}

pub fn extract_work_experiences_with(
    text: &str,
    sections: &SectionMap,
    policy: &dyn EntryPolicy,
) -> Vec<JobEntry> {
    let Some((source, body)) = LOCATORS
        .iter()
        .find_map(|(name, locate)| locate(text, sections).map(|body| (*name, body)))
    else {
        return Vec::new();
    };

    let lines: Vec<&str> = body.lines().collect();
    let anchors = find_anchors(&lines);
    debug!(source, lines = lines.len(), anchors = anchors.len(), "located work history");

    let mut entries: Vec<JobEntry> = anchors
        .iter()
        .enumerate()
        .map(|(j, (anchor, date))| {
            let end = anchors.get(j + 1).map_or(lines.len(), |next| next.0);
            build_entry(
                &EntryContext {
                    lines: &lines,
                    anchor: *anchor,
                    end,
                    date: date.as_str(),
                },
                policy,
            )
        })
        .collect();

    entries.sort_by_key(|e| Reverse(max_year(&e.date)));
    entries
}

/// Lines carrying a date range, with the matched date text.
fn find_anchors(lines: &[&str]) -> Vec<(usize, String)> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            DATE_RANGES.iter().find_map(|re| {
                re.captures(line).and_then(|c| {
                    c.get(1)
                        .or_else(|| c.get(0))
                        .map(|m| (i, m.as_str().trim().to_string()))
                })
            })
        })
        .collect()
}

fn build_entry(cx: &EntryContext<'_>, policy: &dyn EntryPolicy) -> JobEntry {
    let company = policy.company(cx);
    let title = policy.title(cx, company.as_deref());

    let description = cx
        .lines[cx.anchor..cx.end]
        .iter()
        .skip_while(|l| l.trim().is_empty())
        .filter(|l| {
            let l = l.trim();
            Some(l) != company.as_deref() && Some(l) != title.as_deref()
        })
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    JobEntry {
        company: company.unwrap_or_else(|| UNKNOWN.to_string()),
        title: title.unwrap_or_else(|| UNKNOWN.to_string()),
        date: cx.date.to_string(),
        description,
    }
}

/// Latest 19xx/20xx year in a date string, 0 when there is none.
pub fn max_year(date: &str) -> u32 {
    YEAR.find_iter(date)
        .filter_map(|m| m.as_str().parse().ok())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_JOBS: &str = "Jane Doe\nSenior Engineer\nAcme Corp\nJanuary 2019 - Present\nBuilt systems.\nAnalyst\nBeta Inc\nJune 2015 - December 2018\nReports.";

    #[test]
    fn two_jobs_without_headers() {
        let jobs = extract_work_experiences(TWO_JOBS);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].date, "January 2019 - Present");
        assert_eq!(jobs[1].date, "June 2015 - December 2018");
        assert!(jobs.iter().all(|j| j.title != UNKNOWN));
        assert_eq!(jobs[0].company, "Acme Corp");
        assert_eq!(jobs[0].title, "Senior Engineer");
        assert!(jobs[0].description.starts_with("January 2019 - Present"));
        assert!(jobs[0].description.contains("Built systems."));
    }

    #[test]
    fn header_block_stops_at_next_major_header() {
        let text = "Summary\nEngineer\n\nWork Experience\nAcme Corp\nMar 2020 - Present\nShipped.\n\nEducation\nBSc, Tech University, 2014-2018\n";
        let jobs = extract_work_experiences(text);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme Corp");
        assert_eq!(jobs[0].date, "Mar 2020 - Present");
    }

    #[test]
    fn spanish_entries_sorted_by_latest_year() {
        let text = "Experiencia Laboral\nConsultora Andes Ltda\nEnero 2012 a Mayo 2015\nAsesoría.\nQuantum Datos SpA\nMarzo 2020 - Actualidad\nIngeniera de Datos\n";
        let jobs = extract_work_experiences(text);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].company, "Quantum Datos SpA");
        assert_eq!(jobs[0].title, "Ingeniera de Datos");
        assert_eq!(jobs[1].company, "Consultora Andes Ltda");
        assert_eq!(jobs[1].date, "Enero 2012 a Mayo 2015");
    }

    #[test]
    fn company_from_entry_lines_when_previous_line_is_lowercase() {
        let text = "experience follows\n2016 - 2019\nGlobex Corporation\ndid things\n";
        let jobs = extract_work_experiences(text);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Globex Corporation");
        assert_eq!(jobs[0].title, "experience follows");
        assert_eq!(jobs[0].date, "2016 - 2019");
    }

    #[test]
    fn no_dates_no_entries() {
        assert!(extract_work_experiences("Jane Doe\nEngineer at Acme\n").is_empty());
        assert!(extract_work_experiences("   \n").is_empty());
    }

    #[test]
    fn sectioned_resume_without_experience_has_no_entries() {
        let text = "Jane Doe\n\nSkills\nPython, SQL\n\nEducation\nBachelor of Science\nTech University\n2011 - 2015\n";
        assert!(extract_work_experiences(text).is_empty());
    }

    #[test]
    fn undated_entries_last_and_ties_keep_order() {
        let text = "Acme\nMarch 3015 - Present\nOdd date.\nBeta\n2010-2012\nOld job.\nGamma\n2014-2016\nFirst tie.\nDelta\n2015-2016\nSecond tie.\n";
        let dates: Vec<String> = extract_work_experiences(text)
            .into_iter()
            .map(|j| j.date)
            .collect();
        assert_eq!(
            dates,
            vec!["2014-2016", "2015-2016", "2010-2012", "March 3015 - Present"]
        );
    }

    #[test]
    fn long_company_line_needs_legal_suffix() {
        let suffixed = "worked at\n2016 - 2019\nGlobex Global Holdings And Partners Worldwide Inc\n";
        let jobs = extract_work_experiences(suffixed);
        assert_eq!(jobs[0].company, "Globex Global Holdings And Partners Worldwide Inc");

        let plain = "worked at\n2016 - 2019\nGlobex Global Holdings And Partners Worldwide\n";
        let jobs = extract_work_experiences(plain);
        assert_eq!(jobs[0].company, UNKNOWN);
    }

    #[test]
    fn lowercase_prose_is_not_a_title_keyword() {
        let text = "lead generation\nAcme\n2016 - 2019\nGrowth Manager\n";
        let jobs = extract_work_experiences(text);
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].title, "Growth Manager");
    }

    #[test]
    fn unresolved_fields_are_unknown() {
        let jobs = extract_work_experiences("2010-2012");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, UNKNOWN);
        assert_eq!(jobs[0].title, UNKNOWN);
        assert_eq!(jobs[0].description, "2010-2012");
    }

    #[test]
    fn max_year_uses_whole_years() {
        assert_eq!(max_year("June 2015 - December 2018"), 2018);
        assert_eq!(max_year("2016 - Presente"), 2016);
        assert_eq!(max_year(UNKNOWN), 0);
    }

    struct FixedPolicy;

    impl EntryPolicy for FixedPolicy {
        fn company(&self, _: &EntryContext<'_>) -> Option<String> {
            Some("Fixed".into())
        }
        fn title(&self, _: &EntryContext<'_>, _: Option<&str>) -> Option<String> {
            None
        }
    }

    #[test]
    fn policy_is_swappable() {
        let sections = SectionMap::new();
        let jobs = extract_work_experiences_with(TWO_JOBS, &sections, &FixedPolicy);
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(|j| j.company == "Fixed" && j.title == UNKNOWN));
    }
}
