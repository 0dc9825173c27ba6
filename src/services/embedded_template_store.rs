use std::collections::BTreeMap;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::AppError;
use crate::ports::{TemplateKind, TemplateStore};

mod sources {
    pub static README: &str = include_str!("../assets/templates/readme.md");
    pub static INSTALL: &str = include_str!("../assets/templates/install.ps1");
    pub static DETECT_REGISTRY_KEY: &str =
        include_str!("../assets/templates/detect_registry_key.ps1");
    pub static UNINSTALL_REGISTRY_KEY: &str =
        include_str!("../assets/templates/uninstall_registry_key.ps1");
    pub static DETECT_DISPLAY_NAME: &str =
        include_str!("../assets/templates/detect_display_name.ps1");
    pub static UNINSTALL_DISPLAY_NAME: &str =
        include_str!("../assets/templates/uninstall_display_name.ps1");
    pub static DETECT_FILE: &str = include_str!("../assets/templates/detect_file.ps1");
    pub static UNINSTALL_FILE: &str = include_str!("../assets/templates/uninstall_file.ps1");
}

fn source_for(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Readme => sources::README,
        TemplateKind::Install => sources::INSTALL,
        TemplateKind::DetectRegistryKey => sources::DETECT_REGISTRY_KEY,
        TemplateKind::UninstallRegistryKey => sources::UNINSTALL_REGISTRY_KEY,
        TemplateKind::DetectDisplayName => sources::DETECT_DISPLAY_NAME,
        TemplateKind::UninstallDisplayName => sources::UNINSTALL_DISPLAY_NAME,
        TemplateKind::DetectFile => sources::DETECT_FILE,
        TemplateKind::UninstallFile => sources::UNINSTALL_FILE,
    }
}

/// Template store backed by templates embedded in the binary.
///
/// Construction parses every template and verifies its slot contract, so a
/// template referencing an unknown slot is rejected up front rather than
/// silently rendering wrong output later.
pub struct EmbeddedTemplateStore {
    env: Environment<'static>,
}

impl EmbeddedTemplateStore {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for kind in TemplateKind::ALL {
            env.add_template(kind.name(), source_for(kind)).map_err(|err| {
                AppError::TemplateInvalid { name: kind.name().to_string(), reason: err.to_string() }
            })?;
        }

        let store = Self { env };
        store.verify_slot_contracts()?;
        Ok(store)
    }

    fn verify_slot_contracts(&self) -> Result<(), AppError> {
        for kind in TemplateKind::ALL {
            let template = self.env.get_template(kind.name()).map_err(|err| {
                AppError::TemplateInvalid { name: kind.name().to_string(), reason: err.to_string() }
            })?;

            for variable in template.undeclared_variables(false) {
                if !kind.slots().contains(&variable.as_str()) {
                    return Err(AppError::TemplateInvalid {
                        name: kind.name().to_string(),
                        reason: format!("references undeclared slot '{variable}'"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn render(&self, kind: TemplateKind, vars: &[(&str, &str)]) -> Result<String, AppError> {
        let context: BTreeMap<&str, &str> = vars.iter().copied().collect();
        let template = self.env.get_template(kind.name()).map_err(|err| {
            AppError::TemplateInvalid { name: kind.name().to_string(), reason: err.to_string() }
        })?;

        template.render(&context).map_err(|err| AppError::TemplateRender {
            name: kind.name().to_string(),
            reason: err.to_string(),
        })
    }
}
