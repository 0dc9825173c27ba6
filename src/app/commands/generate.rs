//! Single-application package generation.
//!
//! Renders the four bundle artifacts into the output folder, then runs the
//! two best-effort external steps: metadata capture (`winget show`) and
//! packaging (`IntuneWinAppUtil.exe`). External-tool failures never undo the
//! artifacts already written.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::AppContext;
use crate::domain::{AppError, Detection, Slug, normalize_registry_path};
use crate::ports::{TemplateKind, TemplateStore, ToolOutput, ToolRunner};

/// Time budget for each external tool invocation.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(15);

pub const WINGET_PROGRAM: &str = "winget.exe";
pub const PACKAGER_PROGRAM: &str = "IntuneWinAppUtil.exe";

pub const README_FILE: &str = "README.md";
pub const INSTALL_FILE: &str = "install.ps1";
pub const UNINSTALL_FILE: &str = "uninstall.ps1";
pub const DETECT_FILE: &str = "detect.ps1";
pub const PACKAGE_DETAILS_FILE: &str = "package_details.yaml";

/// `winget show` prefixes its report with progress spinner output; the real
/// report starts at the "Found <Name> [<Id>]" line.
const SHOW_MARKER: &str = "Found ";

/// Everything needed to generate one application package.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub identifier: String,
    pub detection: Detection,
    pub version: Option<String>,
    pub show_details: bool,
    pub output_root: PathBuf,
}

/// Outcome of generating one application package.
#[derive(Debug)]
pub struct GenerationReport {
    pub slug: Slug,
    pub output_dir: PathBuf,
    /// Whether `package_details.yaml` was written.
    pub details_captured: bool,
    /// Whether the packaging step completed successfully.
    pub packaged: bool,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<String>,
}

/// Generate a package bundle for a single application.
pub fn execute<T: TemplateStore, R: ToolRunner>(
    ctx: &AppContext<T, R>,
    request: &GenerationRequest,
) -> Result<GenerationReport, AppError> {
    if request.identifier.is_empty() {
        return Err(AppError::validation("Package identifier must be non-empty"));
    }

    let slug = Slug::from_identifier(&request.identifier);
    let output_dir = request.output_root.join(slug.as_str());
    fs::create_dir_all(&output_dir)?;

    let mut warnings = Vec::new();

    let readme = ctx
        .templates()
        .render(TemplateKind::Readme, &[("identifier", request.identifier.as_str())])?;
    fs::write(output_dir.join(README_FILE), readme)?;

    let version_flag = version_flag(request.version.as_deref());
    let install = ctx.templates().render(
        TemplateKind::Install,
        &[("identifier", request.identifier.as_str()), ("version_flag", version_flag.as_str())],
    )?;
    fs::write(output_dir.join(INSTALL_FILE), install)?;

    let (detect, uninstall) = match &request.detection {
        Detection::RegistryKey(path) => {
            let normalized = normalize_registry_path(path);
            let vars = [("registry_key", normalized.as_str())];
            (
                ctx.templates().render(TemplateKind::DetectRegistryKey, &vars)?,
                ctx.templates().render(TemplateKind::UninstallRegistryKey, &vars)?,
            )
        }
        Detection::DisplayName(name) => {
            let vars = [("display_name", name.as_str())];
            (
                ctx.templates().render(TemplateKind::DetectDisplayName, &vars)?,
                ctx.templates().render(TemplateKind::UninstallDisplayName, &vars)?,
            )
        }
        Detection::FilePath(path) => (
            ctx.templates().render(TemplateKind::DetectFile, &[("file_path", path.as_str())])?,
            ctx.templates().render(
                TemplateKind::UninstallFile,
                &[("identifier", request.identifier.as_str())],
            )?,
        ),
    };
    fs::write(output_dir.join(DETECT_FILE), detect)?;
    fs::write(output_dir.join(UNINSTALL_FILE), uninstall)?;

    let details_captured = if request.show_details {
        capture_package_details(ctx.runner(), &request.identifier, &output_dir, &mut warnings)?
    } else {
        false
    };

    let packaged =
        package_bundle(ctx.runner(), &request.detection, &output_dir, &slug, &mut warnings);

    Ok(GenerationReport { slug, output_dir, details_captured, packaged, warnings })
}

fn version_flag(version: Option<&str>) -> String {
    match version {
        Some(version) => format!("--version '{version}'"),
        None => String::new(),
    }
}

fn warn(warnings: &mut Vec<String>, message: String) {
    eprintln!("⚠️  {message}");
    warnings.push(message);
}

fn exit_status(output: &ToolOutput) -> String {
    output.status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

/// Capture `winget show` output as `package_details.yaml`.
///
/// Every external failure mode (missing winget, non-zero exit, timeout,
/// non-UTF-8 output) is reported and skipped; only writing the file itself can
/// fail the generation.
fn capture_package_details<R: ToolRunner>(
    runner: &R,
    identifier: &str,
    output_dir: &Path,
    warnings: &mut Vec<String>,
) -> Result<bool, AppError> {
    let args = ["show", "--exact", "--id", identifier];
    let output = match runner.run(WINGET_PROGRAM, &args, None, TOOL_TIMEOUT) {
        Ok(output) => output,
        Err(err) => {
            warn(warnings, format!("Unable to capture package details for {identifier}: {err}"));
            return Ok(false);
        }
    };

    if !output.success() {
        warn(
            warnings,
            format!(
                "Unable to capture package details for {identifier}: winget returned exit \
                 status {}",
                exit_status(&output)
            ),
        );
        return Ok(false);
    }

    let text = match String::from_utf8(output.stdout) {
        Ok(text) => text,
        Err(_) => {
            warn(
                warnings,
                format!("winget show output for {identifier} is not valid UTF-8; skipping"),
            );
            return Ok(false);
        }
    };

    let details = trim_show_banner(&normalize_line_endings(&text)).to_string();
    fs::write(output_dir.join(PACKAGE_DETAILS_FILE), details)?;
    Ok(true)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn trim_show_banner(text: &str) -> &str {
    match text.find(SHOW_MARKER) {
        Some(position) => &text[position..],
        None => text,
    }
}

/// Invoke the packaging tool over the generated folder. Best-effort: a missing
/// executable, non-zero exit, or timeout is reported and the already-written
/// artifacts stand.
fn package_bundle<R: ToolRunner>(
    runner: &R,
    detection: &Detection,
    output_dir: &Path,
    slug: &Slug,
    warnings: &mut Vec<String>,
) -> bool {
    // DisplayName evidence describes an uninstall-only package; everything
    // else packages the installer as the setup script.
    let source = match detection {
        Detection::DisplayName(_) => UNINSTALL_FILE,
        Detection::RegistryKey(_) | Detection::FilePath(_) => INSTALL_FILE,
    };

    let dir = output_dir.to_string_lossy().to_string();
    let source_path = output_dir.join(source).to_string_lossy().to_string();
    let args = ["-c", dir.as_str(), "-s", source_path.as_str(), "-o", dir.as_str(), "-q"];

    match runner.run(PACKAGER_PROGRAM, &args, None, TOOL_TIMEOUT) {
        Ok(output) if output.success() => true,
        Ok(output) => {
            warn(
                warnings,
                format!(
                    "Unable to generate {slug}.intunewin: {PACKAGER_PROGRAM} returned exit \
                     status {}",
                    exit_status(&output)
                ),
            );
            false
        }
        Err(err) => {
            warn(warnings, format!("Unable to generate {slug}.intunewin: {err}"));
            false
        }
    }
}
