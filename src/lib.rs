//! intunify: Generate Intune Win32 application packages from winget package
//! identifiers and evidence-of-installation metadata.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use app::AppContext;
use app::commands::{bulk, generate};
use services::{EmbeddedTemplateStore, SystemToolRunner};

pub use app::commands::bulk::{BulkOptions, BulkReport, EntryFailure};
pub use app::commands::generate::{GenerationReport, GenerationRequest};
pub use domain::{AppError, CatalogEntry, CatalogRecord, Detection, Slug};

/// Generate a package bundle for a single application.
///
/// Returns a `GenerationReport` describing the produced artifacts and any
/// non-fatal warnings from the external tool steps.
pub fn generate_one(request: &GenerationRequest) -> Result<GenerationReport, AppError> {
    let templates = EmbeddedTemplateStore::new()?;
    let runner = SystemToolRunner::new();
    let ctx = AppContext::new(templates, runner);

    generate::execute(&ctx, request)
}

/// Generate package bundles for every entry in a JSON catalog file.
///
/// The whole catalog is validated up front; generation failures of individual
/// entries are collected in the returned `BulkReport` rather than aborting the
/// run.
pub fn generate_bulk(options: &BulkOptions) -> Result<BulkReport, AppError> {
    let templates = EmbeddedTemplateStore::new()?;
    let runner = SystemToolRunner::new();
    let ctx = AppContext::new(templates, runner);

    bulk::execute(&ctx, options)
}
