use crate::blank::BlankDetector;
use crate::config::RefinerConfig;
use crate::document::{join_lines, split_lines};
use crate::error::{RefinerError, Result};
use crate::fence::{repair_lines, FenceSyntax};
use crate::substitute::normalize_math_delimiters;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Placeholder document, left untouched
    SkippedBlank,

    /// Nothing to change, file not rewritten
    Unchanged,

    /// File replaced with refined content
    Rewritten { fences_inserted: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Totals for one directory run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub directory: PathBuf,
    pub files_seen: usize,
    pub skipped_blank: usize,
    pub rewritten: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub fences_inserted: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::SkippedBlank => self.skipped_blank += 1,
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::Rewritten { fences_inserted } => {
                self.rewritten += 1;
                self.fences_inserted += fences_inserted;
            }
        }
    }

    fn record_failure(&mut self, path: &Path, err: &RefinerError) {
        self.failed += 1;
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            error: err.to_string(),
        });
    }
}

/// Applies blank detection, delimiter substitutions and fence repair to
/// Markdown files
pub struct Refiner {
    config: RefinerConfig,
    syntax: FenceSyntax,
    detector: BlankDetector,
}

impl Refiner {
    /// Create a refiner, rejecting an invalid configuration
    pub fn new(config: RefinerConfig) -> Result<Self> {
        config.validate()?;
        let syntax = config.syntax();
        let detector = config.blank_detector();
        Ok(Self {
            config,
            syntax,
            detector,
        })
    }

    pub fn config(&self) -> &RefinerConfig {
        &self.config
    }

    /// Refine in-memory text; returns the new text and the number of
    /// closing fences inserted.
    pub fn refine_text(&self, text: &str) -> (String, usize) {
        let mut lines = split_lines(text);
        if self.config.math_delimiters {
            for line in &mut lines {
                *line = normalize_math_delimiters(line);
            }
        }
        let inserted = repair_lines(&mut lines, &self.syntax);
        (join_lines(&lines), inserted)
    }

    /// Refine one file in place.
    ///
    /// Read and write failures are returned; a file whose content does not
    /// change is not rewritten.
    pub fn refine_file(&self, path: &Path) -> Result<FileOutcome> {
        if self.config.skip_blank && self.detector.is_blank_file(path) {
            log::info!("Skipping blank MD file: {}", path.display());
            return Ok(FileOutcome::SkippedBlank);
        }

        let original = std::fs::read_to_string(path).map_err(|e| RefinerError::read(path, e))?;
        let (refined, fences_inserted) = self.refine_text(&original);

        if refined == original {
            log::debug!("{} already clean", path.display());
            return Ok(FileOutcome::Unchanged);
        }

        write_atomic(path, refined.as_bytes()).map_err(|e| RefinerError::write(path, e))?;
        log::debug!(
            "rewrote {} ({fences_inserted} fence(s) inserted)",
            path.display()
        );
        Ok(FileOutcome::Rewritten { fences_inserted })
    }

    /// Refine every matching file directly inside `dir`, one at a time.
    ///
    /// A failing file is logged and counted; the run moves on to the next.
    pub fn refine_directory(&self, dir: &Path) -> Result<RunSummary> {
        if !dir.is_dir() {
            return Err(RefinerError::MissingDirectory(dir.to_path_buf()));
        }

        let mut summary = RunSummary {
            directory: dir.to_path_buf(),
            ..RunSummary::default()
        };

        for path in self.matching_files(dir) {
            summary.files_seen += 1;
            match self.refine_file(&path) {
                Ok(outcome) => summary.record(outcome),
                Err(err) => {
                    log::error!("{err}");
                    summary.record_failure(&path, &err);
                }
            }
        }

        log::info!(
            "{} file(s): {} rewritten, {} unchanged, {} blank, {} failed",
            summary.files_seen,
            summary.rewritten,
            summary.unchanged,
            summary.skipped_blank,
            summary.failed
        );
        Ok(summary)
    }

    fn matching_files(&self, dir: &Path) -> Vec<PathBuf> {
        let suffix = self.config.suffix();
        let mut files = Vec::new();

        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry in {}: {err}", dir.display());
                    continue;
                }
            };

            // Follow symlinks to regular files, like a plain open() would
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            if entry.file_name().to_string_lossy().ends_with(&suffix) {
                files.push(entry.into_path());
            }
        }

        files
    }
}

/// Replace `path` with `bytes` through a sibling temp file and a rename,
/// keeping the original permissions. Symlinks are resolved first so the
/// link survives and its target receives the new content.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let path = &std::fs::canonicalize(path)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("refined"),
        std::process::id()
    ));

    let permissions = std::fs::metadata(path)?.permissions();
    {
        let mut file = File::create(&tmp)?;
        if let Err(err) = file
            .write_all(bytes)
            .and_then(|_| file.sync_all())
            .and_then(|_| std::fs::set_permissions(&tmp, permissions))
        {
            let _ = std::fs::remove_file(&tmp);
            return Err(err);
        }
    }

    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}
