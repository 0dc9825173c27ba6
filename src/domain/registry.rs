//! Registry path normalization for PowerShell script literals.

const REGEDIT_PREFIX: &str = r"Computer\";
const LOCAL_MACHINE_HIVE: &str = "HKEY_LOCAL_MACHINE";
const LOCAL_MACHINE_PROVIDER: &str = "HKLM:";

/// Normalize a registry key path for use inside a single-quoted PowerShell
/// string.
///
/// - A leading `Computer\` prefix (as pasted from the regedit address bar) is
///   stripped.
/// - A leading `HKEY_LOCAL_MACHINE` hive name is rewritten to the registry
///   provider form `HKLM:` understood by `Test-Path` and `Get-ItemProperty`.
/// - Apostrophes are doubled so the value stays valid inside a quoted literal.
pub fn normalize_registry_path(path: &str) -> String {
    let path = path.strip_prefix(REGEDIT_PREFIX).unwrap_or(path);
    let rewritten = match path.strip_prefix(LOCAL_MACHINE_HIVE) {
        Some(rest) => format!("{LOCAL_MACHINE_PROVIDER}{rest}"),
        None => path.to_string(),
    };
    rewritten.replace('\'', "''")
}
