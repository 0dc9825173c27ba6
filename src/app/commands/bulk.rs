//! Bulk package generation from a JSON catalog.
//!
//! The whole catalog is validated before anything is generated; a single bad
//! record aborts the run with no side effects. After validation, at most one
//! exclusion source filters the catalog, and each remaining entry is generated
//! independently: a failing entry is recorded and the rest continue.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::app::commands::generate::{self, GenerationReport, GenerationRequest};
use crate::domain::{AppError, apply_exclusions, load_catalog, load_exclusions};
use crate::ports::{TemplateStore, ToolRunner};

/// Options for a bulk generation run.
#[derive(Debug, Clone)]
pub struct BulkOptions {
    pub infile: PathBuf,
    pub outfolder: PathBuf,
    /// Identifiers to exclude, supplied directly. Mutually exclusive with
    /// `excludefile`.
    pub exclude: Vec<String>,
    /// Path to a JSON array of identifiers to exclude.
    pub excludefile: Option<PathBuf>,
    pub show_details: bool,
}

/// A catalog entry that validated but failed during generation.
#[derive(Debug)]
pub struct EntryFailure {
    pub identifier: String,
    pub error: AppError,
}

/// Outcome of a bulk generation run.
#[derive(Debug)]
pub struct BulkReport {
    pub generated: Vec<GenerationReport>,
    /// Number of entries removed by the exclusion filter.
    pub excluded: usize,
    pub failures: Vec<EntryFailure>,
}

/// Run the bulk generation workflow.
pub fn execute<T: TemplateStore, R: ToolRunner>(
    ctx: &AppContext<T, R>,
    options: &BulkOptions,
) -> Result<BulkReport, AppError> {
    let entries = load_catalog(&options.infile)?;

    let excluded_ids = match &options.excludefile {
        Some(path) => load_exclusions(path)?,
        None => options.exclude.clone(),
    };

    let before = entries.len();
    let entries = apply_exclusions(entries, &excluded_ids);
    let excluded = before - entries.len();

    let mut generated = Vec::new();
    let mut failures = Vec::new();
    for entry in entries {
        let request = GenerationRequest {
            identifier: entry.identifier.clone(),
            detection: entry.detection,
            version: entry.version,
            show_details: options.show_details,
            output_root: options.outfolder.clone(),
        };
        match generate::execute(ctx, &request) {
            Ok(report) => generated.push(report),
            Err(error) => {
                eprintln!("⚠️  Failed to generate package for {}: {}", entry.identifier, error);
                failures.push(EntryFailure { identifier: entry.identifier, error });
            }
        }
    }

    Ok(BulkReport { generated, excluded, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::EmbeddedTemplateStore;
    use crate::testing::FakeToolRunner;
    use std::fs;
    use tempfile::TempDir;

    const CATALOG: &str = r#"[
        {"identifier": "Git.Git", "file_path": "C:\\Program Files\\Git"},
        {"identifier": "WinSCP.WinSCP", "registry_key": "HKEY_LOCAL_MACHINE\\SOFTWARE\\winscp3_is1", "version": "5.21.2"},
        {"identifier": "Mozilla.Firefox", "display_name": "Mozilla Firefox"}
    ]"#;

    fn test_ctx() -> AppContext<EmbeddedTemplateStore, FakeToolRunner> {
        AppContext::new(EmbeddedTemplateStore::new().unwrap(), FakeToolRunner::new())
    }

    fn options(root: &TempDir) -> BulkOptions {
        BulkOptions {
            infile: root.path().join("catalog.json"),
            outfolder: root.path().join("out"),
            exclude: Vec::new(),
            excludefile: None,
            show_details: false,
        }
    }

    #[test]
    fn generates_every_catalog_entry_in_order() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("catalog.json"), CATALOG).unwrap();

        let report = execute(&test_ctx(), &options(&root)).unwrap();

        assert!(report.failures.is_empty());
        let slugs: Vec<&str> = report.generated.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, ["Git.Git", "WinSCP.WinSCP", "Mozilla.Firefox"]);
        for slug in slugs {
            assert!(root.path().join("out").join(slug).join("install.ps1").exists());
        }
    }

    #[test]
    fn exclusion_is_case_insensitive() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("catalog.json"), CATALOG).unwrap();
        let mut opts = options(&root);
        opts.exclude = vec!["winscp.WINSCP".to_string()];

        let report = execute(&test_ctx(), &opts).unwrap();

        assert_eq!(report.excluded, 1);
        assert_eq!(report.generated.len(), 2);
        assert!(!root.path().join("out").join("WinSCP.WinSCP").exists());
    }

    #[test]
    fn exclusion_file_is_honored() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("catalog.json"), CATALOG).unwrap();
        fs::write(root.path().join("skip.json"), r#"["git.git", "MOZILLA.firefox"]"#).unwrap();
        let mut opts = options(&root);
        opts.excludefile = Some(root.path().join("skip.json"));

        let report = execute(&test_ctx(), &opts).unwrap();

        assert_eq!(report.excluded, 2);
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.generated[0].slug.as_str(), "WinSCP.WinSCP");
    }

    #[test]
    fn invalid_record_aborts_before_any_generation() {
        let root = TempDir::new().unwrap();
        let catalog = r#"[
            {"identifier": "Git.Git", "file_path": "C:\\Git"},
            {"identifier": "Broken.App"}
        ]"#;
        fs::write(root.path().join("catalog.json"), catalog).unwrap();

        let result = execute(&test_ctx(), &options(&root));

        assert!(matches!(result, Err(AppError::InvalidCatalogEntry { index: 1, .. })));
        assert!(!root.path().join("out").join("Git.Git").exists());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("catalog.json"), "not json").unwrap();

        let result = execute(&test_ctx(), &options(&root));

        assert!(matches!(result, Err(AppError::ParseError { .. })));
    }

    #[test]
    fn entry_failure_does_not_abort_the_rest() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("catalog.json"), CATALOG).unwrap();
        // Occupy the second entry's slug with a file so its directory cannot
        // be created.
        fs::create_dir_all(root.path().join("out")).unwrap();
        fs::write(root.path().join("out").join("WinSCP.WinSCP"), "in the way").unwrap();

        let report = execute(&test_ctx(), &options(&root)).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].identifier, "WinSCP.WinSCP");
        let slugs: Vec<&str> = report.generated.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, ["Git.Git", "Mozilla.Firefox"]);
    }
}
