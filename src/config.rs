use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};

/// Get the default recents directory using platform-appropriate location.
///
/// - macOS: `~/Library/Application Support/aui-recents/`
/// - Linux: `~/.config/aui-recents/` (or `$XDG_CONFIG_HOME`)
/// - Windows: `%APPDATA%/aui-recents/`
///
/// Falls back to `~/.aui-recents/` if the platform dir is unavailable.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("aui-recents"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".aui-recents")
        })
}

/// Path of the persisted recents document for one group key.
///
/// One file per group key, never per owner instance — owners that share a key
/// share the document. A pure function of its inputs, e.g.
/// `aui.plugins.recent.People.json`.
pub fn recents_path(dir: &Path, prefix: &str, key: &str) -> PathBuf {
    dir.join(format!("{prefix}.{key}.json"))
}

/// Load a JSON document, returning Default if missing or corrupt.
/// Logs when the file exists but cannot be read or parsed, so corrupt
/// documents are visible in logs instead of silently resetting state.
pub(crate) fn load_json_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        return T::default();
    }
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("could not read {}: {e}", path.display());
            return T::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("corrupt document {}: {e}; using defaults", path.display());
            T::default()
        }
    }
}

/// Save a JSON document atomically (temp file + rename).
/// Sets 0600 permissions on Unix.
pub(crate) fn save_json_document<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let dir = path
        .parent()
        .ok_or_else(|| format!("document path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir).map_err(|e| format!("Failed to create recents directory: {e}"))?;

    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize: {e}"))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("document path {} has no file name", path.display()))?;
    let temp = dir.join(format!("{}.tmp.{}", file_name, std::process::id()));

    std::fs::write(&temp, &json).map_err(|e| format!("Failed to write temp document: {e}"))?;

    // Restrictive permissions before rename (owner read/write only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&temp, perms)
            .map_err(|e| format!("Failed to set document permissions: {e}"))?;
    }

    // Atomic rename: either the old file or new file exists, never partial
    std::fs::rename(&temp, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp);
        format!("Failed to commit document: {e}")
    })?;

    Ok(())
}
