//! Scanner for XDG `.desktop` application entries

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};
use crate::log;

use super::AppEntry;

/// Scan the given directories for launchable applications.
///
/// Unreadable directories and malformed entries are logged and skipped.
/// Entries are deduplicated by name, first directory wins, and sorted
/// case-insensitively.
pub async fn scan_applications(dirs: &[PathBuf]) -> Vec<AppEntry> {
    let mut apps = vec![];
    let mut seen = HashSet::new();

    for dir in dirs {
        let entries = match read_dir_entries(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                log::log(&format!("Skipping application dir: {}", e));
                continue;
            }
        };

        for path in entries {
            match parse_entry_file(&path).await {
                Ok(Some(app)) => {
                    if seen.insert(app.name.to_lowercase()) {
                        apps.push(app);
                    }
                }
                Ok(None) => {}
                Err(e) => log::log(&format!("Skipping application entry: {}", e)),
            }
        }
    }

    apps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    apps
}

async fn read_dir_entries(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| CatalogError::ReadDir(dir.to_path_buf(), e))?;

    let mut paths = vec![];
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("desktop") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

async fn parse_entry_file(path: &Path) -> CatalogResult<Option<AppEntry>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::ReadEntry(path.to_path_buf(), e))?;
    parse_desktop_entry(&content, path)
}

/// Parse the `[Desktop Entry]` group of a desktop file.
///
/// Returns `Ok(None)` for entries that should not appear in a launcher:
/// hidden ones, non-applications, and entries without a name.
pub fn parse_desktop_entry(content: &str, path: &Path) -> CatalogResult<Option<AppEntry>> {
    let mut in_entry = false;
    let mut found_section = false;
    let mut name: Option<String> = None;
    let mut exec: Option<String> = None;
    let mut hidden = false;
    let mut is_application = true;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            found_section |= in_entry;
            continue;
        }
        if !in_entry {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            // Localized keys like `Name[de]` don't match here.
            "Name" => name = Some(value.trim().to_string()),
            "Exec" => exec = Some(strip_field_codes(value.trim())),
            "NoDisplay" | "Hidden" => hidden |= value.trim() == "true",
            "Type" => is_application = value.trim() == "Application",
            _ => {}
        }
    }

    if !found_section {
        return Err(CatalogError::MissingSection(path.to_path_buf()));
    }
    if hidden || !is_application {
        return Ok(None);
    }

    Ok(name.filter(|n| !n.is_empty()).map(|name| AppEntry {
        name,
        exec,
        source: path.to_path_buf(),
    }))
}

/// Drop `%f`, `%U` and friends from an Exec line.
fn strip_field_codes(exec: &str) -> String {
    exec.split_whitespace()
        .filter(|part| !(part.len() == 2 && part.starts_with('%')))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> CatalogResult<Option<AppEntry>> {
        parse_desktop_entry(content, Path::new("/apps/test.desktop"))
    }

    #[test]
    fn test_parse_basic_entry() {
        let app = parse(
            "[Desktop Entry]\nType=Application\nName=Text Editor\nName[de]=Texteditor\nExec=gedit %U\n",
        )
        .unwrap()
        .unwrap();
        assert_eq!(app.name, "Text Editor");
        assert_eq!(app.exec.as_deref(), Some("gedit"));
        assert_eq!(app.source, PathBuf::from("/apps/test.desktop"));
    }

    #[test]
    fn test_hidden_entries_skipped() {
        assert!(parse("[Desktop Entry]\nName=Daemon\nNoDisplay=true\n").unwrap().is_none());
        assert!(parse("[Desktop Entry]\nName=Gone\nHidden=true\n").unwrap().is_none());
        assert!(parse("[Desktop Entry]\nType=Link\nName=Site\n").unwrap().is_none());
    }

    #[test]
    fn test_other_groups_ignored() {
        let app = parse(
            "[Desktop Entry]\nName=Files\n\n[Desktop Action new-window]\nName=New Window\nExec=files --new\n",
        )
        .unwrap()
        .unwrap();
        assert_eq!(app.name, "Files");
        assert!(app.exec.is_none());
    }

    #[test]
    fn test_missing_name() {
        assert!(parse("[Desktop Entry]\nExec=foo\n").unwrap().is_none());
        assert!(parse("[Desktop Entry]\nName=\n").unwrap().is_none());
    }

    #[test]
    fn test_missing_section_is_error() {
        let err = parse("Name=Orphan\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingSection(_)));
    }

    /// Scratch directory removed when dropped, even if an assert fails.
    struct ScratchDir(PathBuf);

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[tokio::test]
    async fn test_scan_dedups_and_sorts() {
        let scratch = ScratchDir(std::env::temp_dir().join(format!("appgrid_scan_{}", std::process::id())));
        let root = &scratch.0;
        let first = root.join("first");
        let second = root.join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();

        std::fs::write(first.join("zed.desktop"), "[Desktop Entry]\nName=zed\n").unwrap();
        std::fs::write(first.join("calc.desktop"), "[Desktop Entry]\nName=Calculator\n").unwrap();
        std::fs::write(first.join("notes.txt"), "[Desktop Entry]\nName=Notes\n").unwrap();
        std::fs::write(second.join("calc.desktop"), "[Desktop Entry]\nName=Calculator\n").unwrap();
        std::fs::write(second.join("broken.desktop"), "garbage").unwrap();

        let apps = scan_applications(&[first.clone(), second, root.join("missing")]).await;
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Calculator", "zed"]);
        assert_eq!(apps[0].source, first.join("calc.desktop"));
    }
}
