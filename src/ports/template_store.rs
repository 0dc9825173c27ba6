use crate::domain::AppError;

/// The fixed set of artifact templates a package bundle is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Readme,
    Install,
    DetectRegistryKey,
    UninstallRegistryKey,
    DetectDisplayName,
    UninstallDisplayName,
    DetectFile,
    UninstallFile,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 8] = [
        TemplateKind::Readme,
        TemplateKind::Install,
        TemplateKind::DetectRegistryKey,
        TemplateKind::UninstallRegistryKey,
        TemplateKind::DetectDisplayName,
        TemplateKind::UninstallDisplayName,
        TemplateKind::DetectFile,
        TemplateKind::UninstallFile,
    ];

    /// Stable template name, used for error reporting.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Readme => "readme.md",
            TemplateKind::Install => "install.ps1",
            TemplateKind::DetectRegistryKey => "detect_registry_key.ps1",
            TemplateKind::UninstallRegistryKey => "uninstall_registry_key.ps1",
            TemplateKind::DetectDisplayName => "detect_display_name.ps1",
            TemplateKind::UninstallDisplayName => "uninstall_display_name.ps1",
            TemplateKind::DetectFile => "detect_file.ps1",
            TemplateKind::UninstallFile => "uninstall_file.ps1",
        }
    }

    /// The named slots this template is allowed to reference.
    ///
    /// A template referencing anything outside this set fails at store
    /// construction, and rendering must supply every slot the template uses.
    pub fn slots(&self) -> &'static [&'static str] {
        match self {
            TemplateKind::Readme => &["identifier"],
            TemplateKind::Install => &["identifier", "version_flag"],
            TemplateKind::DetectRegistryKey | TemplateKind::UninstallRegistryKey => {
                &["registry_key"]
            }
            TemplateKind::DetectDisplayName | TemplateKind::UninstallDisplayName => {
                &["display_name"]
            }
            TemplateKind::DetectFile => &["file_path"],
            TemplateKind::UninstallFile => &["identifier"],
        }
    }
}

/// Port for rendering artifact templates.
pub trait TemplateStore {
    /// Render a template with the given slot values.
    ///
    /// Every slot the template references must be present in `vars`; a missing
    /// slot is an error, never a silent no-op.
    fn render(&self, kind: TemplateKind, vars: &[(&str, &str)]) -> Result<String, AppError>;
}
