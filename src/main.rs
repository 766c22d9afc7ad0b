use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use cv_extract::output::{self, ExtractionResult};
use cv_extract::pdf::{self, Source};
use cv_extract::settings::Settings;
use cv_extract::{db, parse_resume};

#[derive(Parser)]
#[command(name = "cv_extract", about = "Extract structured data from PDF resumes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text and structured data from one PDF
    Extract {
        /// Path to the PDF file
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        file: Option<PathBuf>,
        /// Base64-encoded PDF content
        #[arg(long)]
        data: Option<String>,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse an already-extracted plain-text resume
    Parse {
        file: PathBuf,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract every PDF in a directory into the results database
    Batch {
        dir: PathBuf,
        /// Max files to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show results database statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load();
    info!(settings = ?settings, "settings loaded");

    let result = match cli.command {
        Commands::Extract { file, data, output } => {
            let caps = settings.capabilities();
            let result = match (&file, &data) {
                (Some(path), _) => output::extract_from_pdf(Source::Path(path), &caps),
                (None, Some(data)) => {
                    let bytes = pdf::decode_data(data);
                    output::extract_from_pdf(Source::Bytes(&bytes), &caps)
                }
                (None, None) => ExtractionResult::failure("No input provided"),
            };
            write_json(&result, output.as_deref())?;
            if result.is_failure() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Parse { file, output } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let record = parse_resume(&text);
            info!(
                jobs = record.work_experiences.len(),
                education = record.education.len(),
                skills = record.skills.len(),
                "parsed resume"
            );
            write_json(&record, output.as_deref())
        }
        Commands::Batch { dir, limit } => {
            let mut paths = find_pdfs(&dir)?;
            if let Some(n) = limit {
                paths.truncate(n);
            }
            if paths.is_empty() {
                println!("No PDF files found in {}.", dir.display());
                return Ok(());
            }
            let conn = db::connect(Path::new(&settings.db_path))?;
            db::init_schema(&conn)?;
            println!("Extracting {} PDFs...", paths.len());
            let counts = process_pdfs(&conn, &settings, &paths)?;
            counts.print();
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(Path::new(&settings.db_path))?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Resumes:   {}", s.resumes);
            println!("Failed:    {}", s.failed);
            println!("Jobs:      {}", s.jobs);
            println!("Education: {}", s.education);
            println!("Skills:    {}", s.skills);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "results saved");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

struct BatchCounts {
    resumes: usize,
    failed: usize,
    jobs: usize,
    education: usize,
    skills: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Saved {} resumes ({} failed), {} jobs, {} education entries, {} skills.",
            self.resumes, self.failed, self.jobs, self.education, self.skills,
        );
    }
}

fn process_pdfs(
    conn: &rusqlite::Connection,
    settings: &Settings,
    paths: &[PathBuf],
) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let caps = settings.capabilities();
    let mut counts = BatchCounts {
        resumes: 0,
        failed: 0,
        jobs: 0,
        education: 0,
        skills: 0,
    };

    for chunk in paths.chunks(settings.batch_chunk.max(1)) {
        let results: Vec<(String, ExtractionResult)> = chunk
            .par_iter()
            .map(|p| (p.display().to_string(), output::extract_from_pdf(Source::Path(p), &caps)))
            .collect();

        for (path, result) in &results {
            counts.resumes += 1;
            match &result.structured_data {
                Some(record) => {
                    counts.jobs += record.work_experiences.len();
                    counts.education += record.education.len();
                    counts.skills += record.skills.len();
                }
                None => {
                    counts.failed += 1;
                    warn!(path = %path, error = ?result.error, "extraction failed");
                }
            }
        }

        db::save_results(conn, &results)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
