//! Static bilingual (English/Spanish) pattern catalog.
//!
//! Everything here is data: regexes compiled once on first use and grouped
//! by what they recognise. Keyword and date patterns are case-insensitive;
//! patterns whose only signal is capitalization (institutions, locations,
//! scalar job titles, company suffixes) are not.

use std::sync::LazyLock;

use regex::Regex;

use super::sections::SectionKind;

// ── Dates ──

const MONTHS_EN: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const MONTHS_ES: &str =
    "Enero|Febrero|Marzo|Abril|Mayo|Junio|Julio|Agosto|Septiembre|Octubre|Noviembre|Diciembre";
const MONTHS_EN_ABBR: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";
const MONTHS_ES_ABBR: &str = "Ene|Feb|Mar|Abr|May|Jun|Jul|Ago|Sep|Oct|Nov|Dic";

/// Hyphen, en-dash, em-dash or the Spanish connector "a".
const RANGE_SEP: &str = r"\s*[-–—a]+\s*";
const ONGOING_EN: &str = "Present|Current";
const ONGOING_ES: &str = "Presente|Actualidad|Actual";

fn month_range(start: &str, end: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)\b(?:{start})\s+\d{{4}}{RANGE_SEP}(?:{end})\s+\d{{4}}"
    ))
    .unwrap()
}

fn month_ongoing(start: &str, ongoing: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{start})\s+\d{{4}}{RANGE_SEP}(?:{ongoing})")).unwrap()
}

static FULL_EN_RANGE: LazyLock<Regex> = LazyLock::new(|| month_range(MONTHS_EN, MONTHS_EN));
static FULL_EN_ONGOING: LazyLock<Regex> = LazyLock::new(|| month_ongoing(MONTHS_EN, ONGOING_EN));
static FULL_ES_RANGE: LazyLock<Regex> = LazyLock::new(|| month_range(MONTHS_ES, MONTHS_ES));
static FULL_ES_ONGOING: LazyLock<Regex> = LazyLock::new(|| month_ongoing(MONTHS_ES, ONGOING_ES));
static ABBR_EN_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let abbr = format!("(?:{MONTHS_EN_ABBR})[a-z]*");
    month_range(&abbr, &abbr)
});
static ABBR_EN_ONGOING: LazyLock<Regex> = LazyLock::new(|| {
    month_ongoing(&format!("(?:{MONTHS_EN_ABBR})[a-z]*"), ONGOING_EN)
});
static ABBR_ES_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let abbr = format!("(?:{MONTHS_ES_ABBR})[a-z]*");
    month_range(&abbr, &abbr)
});
static ABBR_ES_ONGOING: LazyLock<Regex> = LazyLock::new(|| {
    month_ongoing(&format!("(?:{MONTHS_ES_ABBR})[a-z]*"), ONGOING_ES)
});
/// Bare years; the date text is capture group 1 so the digit guards stay out of it.
static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|\D)((?:19|20)\d{{2}}{RANGE_SEP}(?:(?:19|20)\d{{2}}|{ONGOING_ES}|{ONGOING_EN}))(?:\D|$)"
    ))
    .unwrap()
});

/// Job-entry date ranges, in the priority order they are tried on each line.
pub static DATE_RANGES: [&LazyLock<Regex>; 9] = [
    &FULL_EN_RANGE,
    &FULL_EN_ONGOING,
    &FULL_ES_RANGE,
    &FULL_ES_ONGOING,
    &ABBR_EN_RANGE,
    &ABBR_EN_ONGOING,
    &ABBR_ES_RANGE,
    &ABBR_ES_ONGOING,
    &YEAR_RANGE,
];

/// Four-digit years used to rank entries by recency.
pub static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").unwrap());

/// Education year span: `(start, end)` in groups 1 and 2.
pub static EDUCATION_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b((?:19|20)\d{2})\s*[-–—a]+\s*((?:19|20)\d{2}|Present|Current|Actualidad|Actual)",
    )
    .unwrap()
});

// ── Section headers ──

/// Header synonyms per section kind. Multi-word synonyms allow any run of
/// spaces or tabs between words.
pub const SECTION_HEADERS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Summary,
        &[
            "Summary",
            "Profile",
            "About",
            "Objective",
            "Professional Summary",
            "Resumen",
            "Perfil",
            "Objetivo",
            "Acerca de",
        ],
    ),
    (
        SectionKind::Experience,
        &[
            "Experience",
            "Work Experience",
            "Employment",
            "Employment History",
            "Professional Experience",
            "Career",
            "Experiencia",
            "Experiencia Laboral",
            "Empleo",
            "Historial de Empleo",
            "Experiencia Profesional",
            "Trayectoria",
            "Trabajo",
        ],
    ),
    (
        SectionKind::Education,
        &[
            "Education",
            "Educational Background",
            "Academic",
            "Academics",
            "Qualifications",
            "Degrees",
            "Educación",
            "Formación Académica",
            "Estudios",
            "Títulos",
        ],
    ),
    (
        SectionKind::Skills,
        &[
            "Skills",
            "Abilities",
            "Competencies",
            "Technical Skills",
            "Core Competencies",
            "Qualifications",
            "Habilidades",
            "Competencias",
            "Capacidades",
            "Aptitudes",
            "Conocimientos",
        ],
    ),
    (
        SectionKind::Certifications,
        &[
            "Certifications",
            "Certificates",
            "Credentials",
            "Certificaciones",
            "Certificados",
            "Credenciales",
        ],
    ),
    (
        SectionKind::Languages,
        &["Languages", "Language Skills", "Idiomas", "Competencias Lingüísticas"],
    ),
    (
        SectionKind::Projects,
        &[
            "Projects",
            "Key Projects",
            "Significant Projects",
            "Project Experience",
            "Proyectos",
            "Proyectos Clave",
            "Proyectos Significativos",
        ],
    ),
    (
        SectionKind::Interests,
        &[
            "Interests",
            "Hobbies",
            "Activities",
            "Personal Interests",
            "Intereses",
            "Pasatiempos",
            "Actividades",
            "Intereses Personales",
        ],
    ),
    (
        SectionKind::References,
        &[
            "References",
            "Referees",
            "Professional References",
            "Referencias",
            "Árbitros",
            "Referencias Profesionales",
        ],
    ),
    (
        SectionKind::Publications,
        &[
            "Publications",
            "Published Works",
            "Papers",
            "Publicaciones",
            "Trabajos Publicados",
            "Artículos",
        ],
    ),
    (
        SectionKind::Awards,
        &[
            "Awards",
            "Honors",
            "Achievements",
            "Recognitions",
            "Premios",
            "Honores",
            "Logros",
            "Reconocimientos",
        ],
    ),
    (
        SectionKind::Volunteering,
        &[
            "Volunteering",
            "Volunteer Experience",
            "Community Service",
            "Voluntariado",
            "Experiencia de Voluntariado",
            "Servicio Comunitario",
        ],
    ),
];

/// Header lines that open a work-history block when searched for directly.
const EXPERIENCE_START: &[&str] = &[
    "Experience",
    "Work Experience",
    "Employment",
    "Employment History",
    "Professional Experience",
    "Experiencia",
    "Experiencia Laboral",
    "Experiencia Profesional",
    "Trayectoria",
];

/// Major headers that close a work-history block.
const EXPERIENCE_END: &[&str] = &[
    "Education",
    "Educational",
    "Educational Background",
    "Academic",
    "Academics",
    "Qualifications",
    "Degrees",
    "Skills",
    "Technical Skills",
    "Certifications",
    "Projects",
    "Languages",
    "Educación",
    "Formación Académica",
    "Habilidades",
    "Certificaciones",
    "Proyectos",
    "Idiomas",
];

fn synonyms(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.split_whitespace().collect::<Vec<_>>().join(r"[ \t]+"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Header line regex: synonym at a line start, optional trailing words on
/// the same line, then a colon or the line break. Group 1 is the header text.
pub fn header_regex(words: &[&str], trailing_words: usize) -> Regex {
    let trailing = if trailing_words > 0 {
        format!(r"(?:[ \t]+[A-Za-z]+){{0,{trailing_words}}}")
    } else {
        String::new()
    };
    Regex::new(&format!(
        r"(?mi)^[ \t]*((?:{}){trailing})[ \t]*(?::|\r?\n)",
        synonyms(words)
    ))
    .unwrap()
}

/// One compiled header regex per section kind, in catalog order.
pub static SECTION_HEADER_RES: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    SECTION_HEADERS
        .iter()
        .map(|(kind, words)| {
            let trailing = if *kind == SectionKind::Summary { 3 } else { 0 };
            (*kind, header_regex(words, trailing))
        })
        .collect()
});

pub static EXPERIENCE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| header_regex(EXPERIENCE_START, 0));
pub static EXPERIENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| header_regex(EXPERIENCE_END, 0));

// ── Job titles & companies ──

/// Words that mark a line as a job title when choosing among candidates.
pub static TITLE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Director|Directora|CIO|CTO|CEO|CISO|Chief|Head|Manager|Lead|Engineer|Developer|Architect|Analyst|Consultant|Specialist|Scientist|Designer|Asesor|Asesora|Jefe|Jefa|Gerente|Ingeniero|Ingeniera|Desarrollador|Desarrolladora|Analista|Consultor|Consultora|Arquitecto|Especialista)\b",
    )
    .unwrap()
});

/// Legal-form suffixes that identify a company line regardless of length.
pub static COMPANY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Inc|LLC|Ltd|Ltda|SA|S\.A|SpA|SPA|S\.p\.A|SL|GmbH|Corp|Corporation|Company|Consulting|Consultores|Systems|Technologies|Solutions)\b\.?",
    )
    .unwrap()
});

static TITLE_COMPOSED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Senior|Lead|Principal|Junior|Staff)?\s?(?:Software|Data|Full Stack|Frontend|Backend|Web|Mobile|UI|UX|DevOps|Cloud|Machine Learning|AI|QA)?\s?(?:Engineer|Developer|Scientist|Analyst|Designer|Architect|Manager|Director|Consultant|Specialist)\b",
    )
    .unwrap()
});
static TITLE_EXECUTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:CIO|CTO|CEO|VP|Directora?|Gerente|Jef[ea])\b").unwrap()
});
static TITLE_ES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Ingenier[oa]|Desarrolladora?|Analista|Consultora?|Arquitect[oa]|Especialista)\b")
        .unwrap()
});

/// Headline job title strategies.
pub static JOB_TITLES: [&LazyLock<Regex>; 3] = [&TITLE_COMPOSED, &TITLE_EXECUTIVE, &TITLE_ES];

// ── Education ──

static DEGREE_BACHELOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:B\.A\.|B\.S\.|(?:Bachelor|Licenciatura|Licenciado|Licenciada|Graduado|Grado|BA|BS)\b)(?:\sof\s(?:Science|Arts|Business|Engineering)|\sen\s[\p{L} ]+)?",
    )
    .unwrap()
});
static DEGREE_MASTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:M\.B\.A\.|M\.A\.|M\.S\.|(?:Master|Masters|MBA|MA|MS|Máster|Magíster|Maestría)\b)(?:\sof\s(?:Science|Arts|Business|Engineering)|\sen\s[\p{L} ]+)?",
    )
    .unwrap()
});
static DEGREE_DOCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Ph\.D\.|(?:Doctor|Doctorate|Doctorado|PhD)\b)(?:\sof\s(?:Science|Arts|Philosophy|Engineering)|\sen\s[\p{L} ]+)?",
    )
    .unwrap()
});

/// Degree levels in priority order.
pub static DEGREES: [&LazyLock<Regex>; 3] = [&DEGREE_BACHELOR, &DEGREE_MASTER, &DEGREE_DOCTOR];

static INSTITUTION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[A-Z][\p{L} &]+(?:University|College|School|Institute|Universidad|Escuela|Instituto)",
    )
    .unwrap()
});
static INSTITUTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Universidad|Instituto|Escuela|University|Institute|College|School)\s+(?:of|de|del)\s+\p{Lu}\p{L}*(?:\s+(?:(?:de|del|la|of|the|y|and)\s+)?\p{Lu}\p{L}*)*",
    )
    .unwrap()
});

/// "Tech University" first, then "Universidad de Chile".
pub static INSTITUTIONS: [&LazyLock<Regex>; 2] = [&INSTITUTION_SUFFIX, &INSTITUTION_PREFIX];

/// Blank-line break between education paragraphs.
pub static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

// ── Skills ──

static SKILLS_LANGUAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Python|Java|JavaScript|TypeScript|PHP|Ruby|Swift|Kotlin|Rust|SQL|HTML|CSS|Matlab|Scala|Perl|Shell|Bash|(?-i:Go|R))\b",
    )
    .unwrap()
});
/// `\b` cannot close on `+` or `#`, so these get their own guard; group 1 is the token.
static SKILLS_C_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[\s,;/(])(C\+\+|C#)").unwrap());
static SKILLS_FRAMEWORKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:React|Angular|Vue|Node\.js|Express|Django|Flask|Spring|Laravel|Rails|TensorFlow|PyTorch|Scikit-learn|Pandas)\b",
    )
    .unwrap()
});
static SKILLS_TOOLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Git|Docker|Kubernetes|AWS|Azure|GCP|Jenkins|Jira|Confluence|Tableau|PowerBI|Power\s+BI|Excel|Word|PowerPoint|Photoshop|Illustrator)\b",
    )
    .unwrap()
});
static SKILLS_SOFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:Leadership|Communication|Teamwork|Problem-solving|Critical\s+thinking|Time\s+management|Project\s+management|Agile|Scrum|Liderazgo|Comunicación|Trabajo\s+en\s+equipo|Resolución\s+de\s+problemas|Gestión\s+de\s+tiempo|Gestión\s+de\s+proyectos)\b",
    )
    .unwrap()
});
static SKILLS_SECURITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:ISO\s+27001|ISO\s+27000|Information\s+Security|Cybersecurity|Security|SOX|Seguridad\s+Informática|Ciberseguridad)\b",
    )
    .unwrap()
});

/// Every skill vocabulary; all of them are applied, none short-circuits.
pub static SKILLS: [&LazyLock<Regex>; 6] = [
    &SKILLS_LANGUAGES,
    &SKILLS_C_FAMILY,
    &SKILLS_FRAMEWORKS,
    &SKILLS_TOOLS,
    &SKILLS_SOFT,
    &SKILLS_SECURITY,
];

// ── Contact ──

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static PHONE_NANP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static PHONE_INTL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d{1,3}[-.\s]?\d{1,4}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static PHONE_SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());
static PHONE_COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d{1,3}[-.\s]?\d{6,12}").unwrap());

pub static PHONES: [&LazyLock<Regex>; 4] = [&PHONE_NANP, &PHONE_INTL, &PHONE_SIMPLE, &PHONE_COMPACT];

static LINKEDIN_IN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[a-zA-Z0-9_-]+/?").unwrap());
static LINKEDIN_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/profile/[a-zA-Z0-9_-]+/?").unwrap());
static LINKEDIN_WWW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)www\.linkedin\.com/in/[a-zA-Z0-9_-]+/?").unwrap());

pub static LINKEDIN: [&LazyLock<Regex>; 3] = [&LINKEDIN_IN, &LINKEDIN_PROFILE, &LINKEDIN_WWW];

static GITHUB_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/[a-zA-Z0-9_-]+/?").unwrap());
static GITHUB_WWW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)www\.github\.com/[a-zA-Z0-9_-]+/?").unwrap());

pub static GITHUB: [&LazyLock<Regex>; 2] = [&GITHUB_BARE, &GITHUB_WWW];

pub static WEBSITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
    )
    .unwrap()
});

/// Hosts owned by the dedicated profile extractors or by social networks.
pub const WEBSITE_EXCLUDED_HOSTS: &[&str] =
    &["linkedin.com", "github.com", "facebook.com", "twitter.com", "instagram.com"];

// ── Location ──

static LOCATION_ZIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[A-Z][a-z]+ ?){1,2},? [A-Z]{2} \d{5}\b").unwrap());
static LOCATION_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[A-Z][a-z]+ ?){1,2},? [A-Z]{2}\b").unwrap());
static LOCATION_COUNTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Chile|Santiago|España|Mexico|México|Colombia|Argentina)(?:,[ \t]*[\p{L} ]+)?")
        .unwrap()
});
static LOCATION_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Region|Región) (?:Metropolitana|del Bio-?Bío|de Valparaíso)").unwrap()
});

pub static LOCATIONS: [&LazyLock<Regex>; 4] =
    [&LOCATION_ZIP, &LOCATION_STATE, &LOCATION_COUNTRY, &LOCATION_REGION];

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn first_date(line: &str) -> Option<String> {
        DATE_RANGES.iter().find_map(|re| {
            re.captures(line)
                .map(|c| c.get(1).unwrap_or_else(|| c.get(0).unwrap()).as_str().to_string())
        })
    }

    #[test]
    fn every_catalog_regex_compiles() {
        assert_eq!(SECTION_HEADER_RES.len(), SECTION_HEADERS.len());
        for re in DATE_RANGES.iter().chain(JOB_TITLES.iter()).chain(SKILLS.iter()) {
            assert!(!re.as_str().is_empty());
        }
        LazyLock::force(&EXPERIENCE_START_RE);
        LazyLock::force(&EXPERIENCE_END_RE);
    }

    #[test]
    fn english_month_ranges() {
        assert_eq!(
            first_date("June 2015 - December 2018").as_deref(),
            Some("June 2015 - December 2018")
        );
        assert_eq!(
            first_date("January 2019 – Present").as_deref(),
            Some("January 2019 – Present")
        );
        assert_eq!(
            first_date("Sept 2012 — Mar 2014").as_deref(),
            Some("Sept 2012 — Mar 2014")
        );
    }

    #[test]
    fn spanish_ranges_with_connector() {
        assert_eq!(
            first_date("Marzo 2018 a Diciembre 2020").as_deref(),
            Some("Marzo 2018 a Diciembre 2020")
        );
        assert_eq!(
            first_date("Ago 2021 - Actualidad").as_deref(),
            Some("Ago 2021 - Actualidad")
        );
        assert_eq!(
            first_date("enero 2020 - presente").as_deref(),
            Some("enero 2020 - presente")
        );
    }

    #[test]
    fn bare_year_range_excludes_guards() {
        assert_eq!(first_date("Acme (2010-2014)").as_deref(), Some("2010-2014"));
        assert_eq!(first_date("2016 - Presente").as_deref(), Some("2016 - Presente"));
        assert_eq!(first_date("phone 120101-2014"), None);
    }

    #[test]
    fn no_date_in_plain_prose() {
        assert_eq!(first_date("Built distributed systems in Rust."), None);
        assert_eq!(first_date("Summary of 12 projects"), None);
    }

    #[test]
    fn header_regex_matches_line_starts_only() {
        let re = header_regex(&["Work Experience", "Experience"], 0);
        assert!(re.is_match("Work   Experience\n"));
        assert!(re.is_match("intro\n  experience:\n"));
        assert!(!re.is_match("Relevant experience in banking\n"));
        assert!(!re.is_match("Experience"));
    }

    #[test]
    fn company_suffixes() {
        assert!(COMPANY_SUFFIX.is_match("Quantum Discoveries SpA"));
        assert!(COMPANY_SUFFIX.is_match("Acme Holdings Inc."));
        assert!(!COMPANY_SUFFIX.is_match("Senior Engineer"));
    }

    #[test]
    fn title_keywords_are_case_sensitive() {
        assert!(TITLE_KEYWORD.is_match("Data Engineer"));
        assert!(TITLE_KEYWORD.is_match("Ingeniera de Datos"));
        assert!(!TITLE_KEYWORD.is_match("engineer pipelines"));
        assert!(!TITLE_KEYWORD.is_match("lead generation"));
    }
}
