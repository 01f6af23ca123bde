//! Definition loader
//!
//! Reads YAML definition files and collects the `view` entries. A file holds
//! a top-level list of single-key mappings such as:
//!
//! ```yaml
//! - view:
//!     name: nightly
//!     view-type: list
//!     columns: [status, job]
//! - job:
//!     name: unrelated
//! ```
//!
//! Entries of other kinds are ignored.

use super::config::Config;
use super::patterns::ExcludeRules;
use crate::view::errors::{Result, ViewError};
use crate::view::options::{OptionValue, ViewOptions, yaml_kind};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const VIEW_KIND: &str = "view";

/// Collects view definitions from one or more sources
#[derive(Debug, Default)]
pub struct ViewLoader {
    allow_duplicates: bool,
    views: Vec<(String, ViewOptions)>,
    index: HashMap<String, usize>,
}

impl ViewLoader {
    /// Creates a loader using the duplicate policy from `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            allow_duplicates: config.allow_duplicates,
            ..Self::default()
        }
    }

    /// Parses definitions from YAML text. `source` names the input in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Parse`] for malformed input and
    /// [`ViewError::Duplicate`] for repeated ids when duplicates are not allowed.
    pub fn parse_str(&mut self, content: &str, source: &str) -> Result<()> {
        let data: Value = serde_yaml::from_str(content)
            .map_err(|e| ViewError::Parse(format!("{source}: {e}")))?;

        let items = match data {
            Value::Null => return Ok(()),
            Value::Sequence(items) => items,
            other => {
                return Err(ViewError::Parse(format!(
                    "The topmost collection in file '{source}' must be a list, not a {}",
                    yaml_kind(&other)
                )));
            }
        };

        for item in &items {
            self.parse_item(item, source)?;
        }
        Ok(())
    }

    fn parse_item(&mut self, item: &Value, source: &str) -> Result<()> {
        let Value::Mapping(entry) = item else {
            return Err(ViewError::Parse(format!(
                "{source}: expected a mapping entry, got {}",
                yaml_kind(item)
            )));
        };

        let mut pairs = entry.iter();
        let Some((kind, definition)) = pairs.next() else {
            return Ok(());
        };
        if pairs.next().is_some() {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("None");
            return Err(ViewError::Parse(format!(
                "Syntax error, for item named '{name}'. Missing indent?"
            )));
        }

        if kind.as_str() != Some(VIEW_KIND) {
            debug!(kind = ?kind, source, "skipping non-view entry");
            return Ok(());
        }

        let mut options = ViewOptions::try_from(definition)?;
        // YAML reads `name: 2024` as a number
        if let Some(name) = scalar_id(&options, "name")? {
            options.insert("name", name);
        }
        let id = match scalar_id(&options, "id")? {
            Some(id) => id,
            None => options
                .name()
                .ok_or_else(|| ViewError::MissingField {
                    field: "name".to_string(),
                })?
                .to_string(),
        };
        self.insert(id, options, source)
    }

    fn insert(&mut self, id: String, options: ViewOptions, source: &str) -> Result<()> {
        if let Some(&slot) = self.index.get(&id) {
            if !self.allow_duplicates {
                return Err(ViewError::Duplicate {
                    file: source.to_string(),
                    id,
                });
            }
            warn!(id = %id, source, "duplicate view definition replaces earlier one");
            self.views[slot].1 = options;
            return Ok(());
        }

        debug!(id = %id, source, "loaded view definition");
        self.index.insert(id.clone(), self.views.len());
        self.views.push((id, options));
        Ok(())
    }

    /// Parses one definition file.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Io`] if the file cannot be read, plus any
    /// [`parse_str`][Self::parse_str] error.
    pub fn parse_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| ViewError::Io(format!("{}: {e}", path.display())))?;
        self.parse_str(&content, &path.display().to_string())
    }

    /// Loads every definition file found under `paths`.
    ///
    /// Each entry may hold several paths joined by the platform path list
    /// separator (`:` on Unix, `;` on Windows).
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Pattern`] for a bad `exclude` pattern and
    /// propagates file discovery and parse errors.
    pub fn load_paths<S: AsRef<str>>(
        &mut self,
        paths: &[PathBuf],
        recursive: bool,
        exclude: &[S],
    ) -> Result<()> {
        let exclude = ExcludeRules::new(exclude)?;
        for entry in paths {
            for path in std::env::split_paths(entry) {
                if path.as_os_str().is_empty() {
                    continue;
                }
                for file in definition_files(&path, recursive, &exclude)? {
                    self.parse_file(&file)?;
                }
            }
        }
        Ok(())
    }

    /// Number of loaded views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True if no views were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Loaded views in definition order.
    pub fn views(&self) -> impl Iterator<Item = &ViewOptions> {
        self.views.iter().map(|(_, options)| options)
    }
}

/// Text of a scalar identifying option. Integers and booleans are
/// stringified; lists are rejected.
fn scalar_id(options: &ViewOptions, key: &str) -> Result<Option<String>> {
    match options.get(key) {
        None => Ok(None),
        Some(OptionValue::Str(s)) => Ok(Some(s.clone())),
        Some(OptionValue::Int(i)) => Ok(Some(i.to_string())),
        Some(OptionValue::Bool(b)) => Ok(Some(if *b { "True" } else { "False" }.to_string())),
        Some(OptionValue::List(_)) => Err(ViewError::TypeMismatch {
            key: key.to_string(),
            expected: "a scalar",
        }),
    }
}

/// Lists the YAML files under `path`.
///
/// A file path is returned as is. For a directory, `*.yaml` and `*.yml`
/// files are returned in name order; subdirectories are scanned only when
/// `recursive` is set, skipping any that `exclude` rules out. Directories
/// are walked from their canonical path.
///
/// # Errors
///
/// Returns [`ViewError::Io`] if a directory cannot be read.
pub fn definition_files(
    path: &Path,
    recursive: bool,
    exclude: &ExcludeRules,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(ViewError::Io(format!("{}: no such file or directory", path.display())));
    }
    let root = path
        .canonicalize()
        .map_err(|e| ViewError::Io(format!("{}: {e}", path.display())))?;

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !exclude.excludes(entry.path())
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ViewError::Io(e.to_string()))?;
        let is_yaml = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if entry.file_type().is_file() && is_yaml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DEFINITIONS: &str = r"
- job:
    name: compile
- view:
    name: nightly
    columns: [status, job]
- view:
    name: release
    view-type: pipeline
    first-job: compile
";

    fn loader() -> ViewLoader {
        ViewLoader::new(&Config::default())
    }

    fn no_excludes() -> ExcludeRules {
        ExcludeRules::new::<&str>(&[]).unwrap()
    }

    #[test]
    fn test_parse_collects_views_only() {
        let mut loader = loader();
        loader.parse_str(DEFINITIONS, "defs.yaml").unwrap();
        let names: Vec<_> = loader.views().filter_map(ViewOptions::name).collect();
        assert_eq!(names, vec!["nightly", "release"]);
    }

    #[test]
    fn test_parse_rejects_non_list() {
        let err = loader().parse_str("view:\n  name: x\n", "defs.yaml").unwrap_err();
        assert!(err.to_string().contains("must be a list"));
    }

    #[test]
    fn test_parse_missing_indent() {
        let err = loader()
            .parse_str("- view:\n  name: broken\n", "defs.yaml")
            .unwrap_err();
        assert!(err.to_string().contains("Missing indent"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_parse_empty_file() {
        let mut loader = loader();
        loader.parse_str("", "empty.yaml").unwrap();
        assert!(loader.is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut loader = loader();
        loader.parse_str("- view:\n    name: a\n", "one.yaml").unwrap();
        let err = loader.parse_str("- view:\n    name: a\n", "two.yaml").unwrap_err();
        assert_eq!(
            err,
            ViewError::Duplicate {
                file: "two.yaml".to_string(),
                id: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_allowed_replaces() {
        let config = Config {
            allow_duplicates: true,
            ..Config::default()
        };
        let mut loader = ViewLoader::new(&config);
        loader
            .parse_str("- view:\n    name: a\n    description: first\n", "one.yaml")
            .unwrap();
        loader
            .parse_str("- view:\n    name: a\n    description: second\n", "two.yaml")
            .unwrap();
        assert_eq!(loader.len(), 1);
        let view = loader.views().next().unwrap();
        assert_eq!(view.str("description").unwrap(), Some("second"));
    }

    #[test]
    fn test_id_overrides_name() {
        let mut loader = loader();
        loader
            .parse_str(
                "- view:\n    id: v1\n    name: same\n- view:\n    id: v2\n    name: same\n",
                "defs.yaml",
            )
            .unwrap();
        assert_eq!(loader.len(), 2);
    }

    #[test]
    fn test_view_without_name() {
        let err = loader()
            .parse_str("- view:\n    description: x\n", "defs.yaml")
            .unwrap_err();
        assert!(matches!(err, ViewError::MissingField { .. }));
    }

    #[test]
    fn test_numeric_id_and_name() {
        let mut loader = loader();
        loader
            .parse_str(
                "- view:\n    name: 2024\n- view:\n    id: 7\n    name: seven\n",
                "defs.yaml",
            )
            .unwrap();
        assert_eq!(loader.len(), 2);
        let names: Vec<_> = loader.views().filter_map(ViewOptions::name).collect();
        assert_eq!(names, vec!["2024", "seven"]);

        let err = loader.parse_str("- view:\n    name: 2024\n", "again.yaml").unwrap_err();
        assert!(matches!(err, ViewError::Duplicate { ref id, .. } if id == "2024"));
        let err = loader.parse_str("- view:\n    id: 7\n    name: x\n", "again.yaml").unwrap_err();
        assert!(matches!(err, ViewError::Duplicate { ref id, .. } if id == "7"));
    }

    #[test]
    fn test_list_id_rejected() {
        let err = loader()
            .parse_str("- view:\n    id: [a, b]\n    name: x\n", "defs.yaml")
            .unwrap_err();
        assert!(matches!(err, ViewError::TypeMismatch { ref key, .. } if key == "id"));
    }

    #[test]
    fn test_definition_files_non_recursive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.yaml"), "").unwrap();
        fs::write(dir.path().join("a.yml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.yaml"), "").unwrap();

        let files = definition_files(dir.path(), false, &no_excludes()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yaml"]);
    }

    #[test]
    fn test_definition_files_recursive_with_exclude() {
        let dir = TempDir::new().unwrap();
        for sub in ["keep", "old-views"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("v.yaml"), "").unwrap();
        }

        let exclude = ExcludeRules::new(&["old*"]).unwrap();
        let files = definition_files(dir.path(), true, &exclude).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep/v.yaml"));
    }

    #[test]
    fn test_definition_files_absolute_exclude() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        for sub in ["a/skip", "b/skip"] {
            fs::create_dir_all(root.join(sub)).unwrap();
            fs::write(root.join(sub).join("v.yaml"), "").unwrap();
        }

        let pattern = root.join("a").join("sk*").to_string_lossy().into_owned();
        let exclude = ExcludeRules::new(&[pattern]).unwrap();
        let files = definition_files(&root, true, &exclude).unwrap();
        assert_eq!(files, vec![root.join("b/skip/v.yaml")]);
    }

    #[test]
    fn test_load_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("views.yaml"), DEFINITIONS).unwrap();

        let mut loader = loader();
        loader
            .load_paths::<&str>(&[dir.path().to_path_buf()], false, &[])
            .unwrap();
        assert_eq!(loader.len(), 2);
    }

    #[test]
    fn test_load_joined_path_list() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.yaml");
        let second = dir.path().join("b.yaml");
        fs::write(&first, "- view:\n    name: first\n").unwrap();
        fs::write(&second, "- view:\n    name: second\n").unwrap();
        let joined = std::env::join_paths([&first, &second]).unwrap();

        let mut loader = loader();
        loader
            .load_paths::<&str>(&[PathBuf::from(joined)], false, &[])
            .unwrap();
        let names: Vec<_> = loader.views().filter_map(ViewOptions::name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_load_joined_exclude_list() {
        let dir = TempDir::new().unwrap();
        for sub in ["keep", "tmp", "build"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(
                dir.path().join(sub).join("v.yaml"),
                format!("- view:\n    name: {sub}\n"),
            )
            .unwrap();
        }
        let joined = std::env::join_paths(["tmp", "build"]).unwrap();
        let exclude = vec![joined.to_string_lossy().into_owned()];

        let mut loader = loader();
        loader
            .load_paths(&[dir.path().to_path_buf()], true, &exclude)
            .unwrap();
        let names: Vec<_> = loader.views().filter_map(ViewOptions::name).collect();
        assert_eq!(names, vec!["keep"]);
    }

    #[test]
    fn test_load_bad_exclude_pattern() {
        let dir = TempDir::new().unwrap();
        let err = loader()
            .load_paths(&[dir.path().to_path_buf()], true, &["[z-a]"])
            .unwrap_err();
        assert!(matches!(err, ViewError::Pattern { .. }));
    }

    #[test]
    fn test_load_missing_path() {
        let err = loader()
            .load_paths::<&str>(&[PathBuf::from("/nonexistent/views")], false, &[])
            .unwrap_err();
        assert!(matches!(err, ViewError::Io(_)));
    }
}
