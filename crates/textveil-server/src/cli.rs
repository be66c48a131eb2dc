//! File redaction CLI: redact a plain-text file or a directory tree.
//!
//! Reads each input as UTF-8 text, runs the full pipeline, writes the
//! redacted copy to the mirrored output path. Binary or non-UTF-8 files are
//! reported as errors without stopping the run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use textveil_core::TextveilConfig;
use textveil_runtime::Pipeline;

/// Result of a CLI redaction run.
#[derive(Debug, Default)]
pub struct RedactRunReport {
    pub files_processed: usize,
    pub entities_redacted: usize,
    pub errors: Vec<String>,
}

/// Redact a single file or every file under a directory.
pub fn run_redact(input: &Path, output: &Path) -> RedactRunReport {
    let config = TextveilConfig::from_env();
    let recognizer = textveil_recognize::create_recognizer(&config.model_dir);
    let pipeline = Pipeline::with_mask(recognizer, config.mask);

    let mut report = RedactRunReport::default();

    if input.is_file() {
        redact_file(&pipeline, input, output, &mut report);
    } else if input.is_dir() {
        redact_tree(&pipeline, input, output, &mut report);
    } else {
        report
            .errors
            .push(format!("{} is not a file or directory", input.display()));
    }

    report
}

fn redact_file(pipeline: &Pipeline, input: &Path, output: &Path, report: &mut RedactRunReport) {
    let content = match fs::read_to_string(input) {
        Ok(c) => c,
        Err(e) => {
            report
                .errors
                .push(format!("{}: {}", input.display(), e));
            return;
        }
    };

    let redaction = match pipeline.redact(&content) {
        Ok(r) => r,
        Err(e) => {
            report
                .errors
                .push(format!("{}: {}", input.display(), e));
            return;
        }
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                report
                    .errors
                    .push(format!("{}: {}", parent.display(), e));
                return;
            }
        }
    }

    if let Err(e) = fs::write(output, &redaction.text) {
        report
            .errors
            .push(format!("{}: {}", output.display(), e));
        return;
    }

    info!(
        "Redacted {} -> {} ({} entities)",
        input.display(),
        output.display(),
        redaction.report.len()
    );
    report.files_processed += 1;
    report.entities_redacted += redaction.report.len();
}

fn redact_tree(pipeline: &Pipeline, input: &Path, output: &Path, report: &mut RedactRunReport) {
    let mut stack: Vec<PathBuf> = vec![input.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(e) => e,
            Err(e) => {
                report.errors.push(format!("{}: {}", dir.display(), e));
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                let relative = match path.strip_prefix(input) {
                    Ok(r) => r.to_path_buf(),
                    Err(_) => continue,
                };
                redact_file(pipeline, &path, &output.join(relative), report);
            }
        }
    }
}

pub fn print_report(report: &RedactRunReport) {
    println!("=== Textveil Redaction Report ===");
    println!();
    println!("Files processed:    {}", report.files_processed);
    println!("Entities redacted:  {}", report.entities_redacted);

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for e in &report.errors {
            println!("  - {}", e);
        }
    }

    println!();
    if report.errors.is_empty() {
        println!("Status: COMPLETE");
    } else {
        println!("Status: COMPLETED WITH ERRORS");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out/in.txt");
        fs::write(&input, "mail a@x.com and dial (555) 123-4567 today").unwrap();

        let report = run_redact(&input, &output);
        assert!(report.errors.is_empty());
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.entities_redacted, 2);

        let redacted = fs::read_to_string(&output).unwrap();
        assert!(!redacted.contains("a@x.com"));
        assert!(!redacted.contains("(555) 123-4567"));
        assert!(redacted.contains("[REDACTED]"));
    }

    #[test]
    fn test_redact_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input_root = dir.path().join("in");
        fs::create_dir_all(input_root.join("nested")).unwrap();
        fs::write(input_root.join("a.txt"), "card 5500000000000004").unwrap();
        fs::write(input_root.join("nested/b.txt"), "no pii here").unwrap();

        let output_root = dir.path().join("out");
        let report = run_redact(&input_root, &output_root);
        assert!(report.errors.is_empty());
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.entities_redacted, 1);

        assert!(output_root.join("a.txt").exists());
        assert!(output_root.join("nested/b.txt").exists());
        let a = fs::read_to_string(output_root.join("a.txt")).unwrap();
        assert_eq!(a, "card [REDACTED]");
    }

    #[test]
    fn test_missing_input_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_redact(&dir.path().join("absent"), &dir.path().join("out"));
        assert_eq!(report.files_processed, 0);
        assert!(!report.errors.is_empty());
    }
}
