use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::output::ExtractionResult;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating database directory {}", dir.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("opening database {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS resumes (
            id           INTEGER PRIMARY KEY,
            path         TEXT UNIQUE NOT NULL,
            name         TEXT,
            email        TEXT,
            phone        TEXT,
            linkedin     TEXT,
            github       TEXT,
            website      TEXT,
            location     TEXT,
            job_title    TEXT,
            backend      TEXT,
            chars        INTEGER NOT NULL DEFAULT 0,
            sections     TEXT,
            error        TEXT,
            processed_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS work_experiences (
            id          INTEGER PRIMARY KEY,
            resume_id   INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            company     TEXT NOT NULL,
            title       TEXT NOT NULL,
            date        TEXT NOT NULL,
            description TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_work_resume ON work_experiences(resume_id);

        CREATE TABLE IF NOT EXISTS education (
            id          INTEGER PRIMARY KEY,
            resume_id   INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            degree      TEXT NOT NULL,
            institution TEXT NOT NULL,
            date        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_education_resume ON education(resume_id);

        CREATE TABLE IF NOT EXISTS skills (
            resume_id INTEGER NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
            skill     TEXT NOT NULL,
            UNIQUE(resume_id, skill)
        );
        CREATE INDEX IF NOT EXISTS idx_skills_skill ON skills(skill);
        ",
    )?;
    Ok(())
}

// ── Results ──

/// Store a chunk of results in one transaction, replacing earlier rows for the same paths.
pub fn save_results(conn: &Connection, rows: &[(String, ExtractionResult)]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut del_stmt = tx.prepare("DELETE FROM resumes WHERE path = ?1")?;
        let mut r_stmt = tx.prepare(
            "INSERT INTO resumes
             (path, name, email, phone, linkedin, github, website, location, job_title,
              backend, chars, sections, error)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
        )?;
        let mut w_stmt = tx.prepare(
            "INSERT INTO work_experiences (resume_id, position, company, title, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        let mut e_stmt = tx.prepare(
            "INSERT INTO education (resume_id, position, degree, institution, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        let mut s_stmt =
            tx.prepare("INSERT OR IGNORE INTO skills (resume_id, skill) VALUES (?1, ?2)")?;

        for (path, result) in rows {
            del_stmt.execute([path])?;

            let record = result.structured_data.as_ref();
            let sections = serde_json::to_string(&result.sections)?;
            r_stmt.execute(rusqlite::params![
                path,
                record.and_then(|r| r.name.as_deref()),
                record.and_then(|r| r.email.as_deref()),
                record.and_then(|r| r.phone.as_deref()),
                record.and_then(|r| r.linkedin.as_deref()),
                record.and_then(|r| r.github.as_deref()),
                record.and_then(|r| r.website.as_deref()),
                record.and_then(|r| r.location.as_deref()),
                record.and_then(|r| r.job_title.as_deref()),
                result.backend.map(|b| b.as_str()),
                result.full_text.chars().count(),
                sections,
                result.error,
            ])?;
            let resume_id = tx.last_insert_rowid();

            let Some(record) = record else { continue };
            for (i, j) in record.work_experiences.iter().enumerate() {
                w_stmt.execute(rusqlite::params![
                    resume_id, i, j.company, j.title, j.date, j.description,
                ])?;
            }
            for (i, e) in record.education.iter().enumerate() {
                e_stmt.execute(rusqlite::params![resume_id, i, e.degree, e.institution, e.date])?;
            }
            for skill in &record.skills {
                s_stmt.execute(rusqlite::params![resume_id, skill])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Stats ──

pub struct Stats {
    pub resumes: usize,
    pub failed: usize,
    pub jobs: usize,
    pub education: usize,
    pub skills: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let resumes: usize = conn.query_row("SELECT COUNT(*) FROM resumes", [], |r| r.get(0))?;
    let failed: usize = conn.query_row(
        "SELECT COUNT(*) FROM resumes WHERE error IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let jobs: usize =
        conn.query_row("SELECT COUNT(*) FROM work_experiences", [], |r| r.get(0))?;
    let education: usize = conn.query_row("SELECT COUNT(*) FROM education", [], |r| r.get(0))?;
    let skills: usize =
        conn.query_row("SELECT COUNT(DISTINCT skill) FROM skills", [], |r| r.get(0))?;
    Ok(Stats {
        resumes,
        failed,
        jobs,
        education,
        skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{Backend, PlainText};

    fn ok_result(text: &str) -> ExtractionResult {
        ExtractionResult::from_plain_text(PlainText {
            text: text.into(),
            pages: None,
            backend: Backend::PdfExtract,
        })
    }

    const RESUME: &str = "Jane Doe\njane@example.com\n\nExperience\nAcme Corp\n2019 - 2021\nSenior Engineer\n\nEducation\nBachelor of Science\nTech University\n\nSkills\nRust, SQL, Python";

    fn open() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = connect(&dir.path().join("nested/test.sqlite")).unwrap();
        init_schema(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn saves_records_and_children() {
        let (_dir, conn) = open();
        save_results(
            &conn,
            &[
                ("a.pdf".into(), ok_result(RESUME)),
                ("b.pdf".into(), ExtractionResult::failure("All extraction methods failed")),
            ],
        )
        .unwrap();

        let s = get_stats(&conn).unwrap();
        assert_eq!(s.resumes, 2);
        assert_eq!(s.failed, 1);
        assert_eq!(s.jobs, 1);
        assert_eq!(s.education, 1);
        assert_eq!(s.skills, 3);

        let (email, backend): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT email, backend FROM resumes WHERE path = 'a.pdf'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(email.as_deref(), Some("jane@example.com"));
        assert_eq!(backend.as_deref(), Some("pdf_extract"));
    }

    #[test]
    fn reprocessing_replaces_rows() {
        let (_dir, conn) = open();
        save_results(&conn, &[("a.pdf".into(), ok_result(RESUME))]).unwrap();
        save_results(&conn, &[("a.pdf".into(), ok_result(RESUME))]).unwrap();

        let s = get_stats(&conn).unwrap();
        assert_eq!(s.resumes, 1);
        assert_eq!(s.jobs, 1);
        assert_eq!(s.education, 1);
    }
}
