//! Generator detection
//!
//! Scans generator directories for C++ sources that define a pybind11
//! module. A source qualifies when its text contains
//! `PYBIND11_MODULE(<name>, ...)`; the captured name becomes the module name.

use super::types::ModuleSpec;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Marker that identifies a pybind11 binding source and names its module
static MODULE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PYBIND11_MODULE\(\s*([A-Za-z0-9_]+)").expect("should build valid regex")
});

/// Extract the module name from source text
///
/// Only the first marker counts.
///
/// # Example
///
/// ```rust,ignore
/// use genbuild::extensions::extract_module_name;
///
/// let name = extract_module_name("PYBIND11_MODULE(igen, m) { }");
/// assert_eq!(name.as_deref(), Some("igen"));
/// ```
#[must_use]
pub fn extract_module_name(text: &str) -> Option<String> {
    MODULE_MARKER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
}

/// Source files directly inside `dir` with the given extension, by file name
///
/// Symlinked sources count as files. Missing directories yield nothing.
#[must_use]
pub fn source_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect()
}

/// Discover every generator module under `roots`
///
/// Roots are scanned in order, files within a root by name. Files that are not
/// UTF-8 or carry no marker are skipped. The result is sorted by module name;
/// equal names keep scan order.
#[must_use]
pub fn discover_modules(roots: &[PathBuf], extension: &str) -> Vec<ModuleSpec> {
    let mut modules = Vec::new();

    for root in roots {
        if !root.exists() {
            continue;
        }

        for source in source_files(root, extension) {
            let text = match std::fs::read_to_string(&source) {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::InvalidData => continue,
                Err(e) => {
                    crate::debug!("skipping unreadable source {}: {e}", source.display());
                    continue;
                }
            };

            let Some(name) = extract_module_name(&text) else {
                continue;
            };

            modules.push(ModuleSpec::new(name, source));
        }
    }

    modules.sort_by(|a, b| a.name.cmp(&b.name));
    modules
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &Path, file: &str, contents: &[u8]) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), contents).unwrap();
    }

    #[test]
    fn extracts_module_name() {
        assert_eq!(
            extract_module_name("PYBIND11_MODULE(gen_tree_graph, m) {\n}").as_deref(),
            Some("gen_tree_graph")
        );
        assert_eq!(
            extract_module_name("PYBIND11_MODULE(  \n bgen , m)").as_deref(),
            Some("bgen")
        );
    }

    #[test]
    fn first_marker_wins() {
        let text = "PYBIND11_MODULE(first, m) {}\nPYBIND11_MODULE(second, m) {}";

        assert_eq!(extract_module_name(text).as_deref(), Some("first"));
    }

    #[test]
    fn no_marker_no_name() {
        assert!(extract_module_name("int main() { return 0; }").is_none());
        assert!(extract_module_name("PYBIND11_MODULE()").is_none());
    }

    #[test]
    fn discovers_sorted_by_module_name() {
        let temp = TempDir::new().unwrap();
        let generators = temp.path().join("generators");
        // File order (a, b) is the reverse of module-name order
        write_source(&generators, "a.cpp", b"PYBIND11_MODULE(zeta, m) {}");
        write_source(&generators, "b.cpp", b"PYBIND11_MODULE(alpha, m) {}");

        let modules = discover_modules(&[generators.clone()], "cpp");

        assert_eq!(
            modules,
            vec![
                ModuleSpec::new("alpha", generators.join("b.cpp")),
                ModuleSpec::new("zeta", generators.join("a.cpp")),
            ]
        );
    }

    #[test]
    fn skips_sources_without_marker() {
        let temp = TempDir::new().unwrap();
        let generators = temp.path().join("generators");
        write_source(&generators, "igen.cpp", b"PYBIND11_MODULE(igen, m) {}");
        write_source(&generators, "plain.cpp", b"int main() { return 0; }");

        let modules = discover_modules(&[generators], "cpp");

        assert_eq!(modules.len(), 1);
        assert_eq!(modules.first().map(|m| m.name.as_str()), Some("igen"));
    }

    #[test]
    fn skips_non_utf8_sources() {
        let temp = TempDir::new().unwrap();
        let generators = temp.path().join("generators");
        write_source(&generators, "bad.cpp", b"PYBIND11_MODULE(bad, m) {} \xff\xfe");
        write_source(&generators, "good.cpp", b"PYBIND11_MODULE(good, m) {}");

        let modules = discover_modules(&[generators], "cpp");

        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["good"]);
    }

    #[cfg(unix)]
    #[test]
    fn discovers_symlinked_sources() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        let generators = temp.path().join("generators");
        write_source(&shared, "igen.cpp", b"PYBIND11_MODULE(igen, m) {}");
        fs::create_dir_all(&generators).unwrap();
        std::os::unix::fs::symlink(shared.join("igen.cpp"), generators.join("igen.cpp"))
            .unwrap();

        let modules = discover_modules(&[generators.clone()], "cpp");

        assert_eq!(
            modules,
            vec![ModuleSpec::new("igen", generators.join("igen.cpp"))]
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlinks_are_skipped() {
        let temp = TempDir::new().unwrap();
        let generators = temp.path().join("generators");
        fs::create_dir_all(&generators).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.cpp"), generators.join("gone.cpp"))
            .unwrap();

        assert!(discover_modules(&[generators], "cpp").is_empty());
    }

    #[test]
    fn ignores_other_extensions_and_subdirectories() {
        let temp = TempDir::new().unwrap();
        let generators = temp.path().join("generators");
        write_source(&generators, "notes.txt", b"PYBIND11_MODULE(notes, m)");
        write_source(&generators.join("nested"), "deep.cpp", b"PYBIND11_MODULE(deep, m)");

        assert!(discover_modules(&[generators], "cpp").is_empty());
    }

    #[test]
    fn merges_multiple_roots_and_tolerates_missing_ones() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("generators");
        let second = temp.path().join("testlib").join("generators");
        write_source(&first, "swgen.cpp", b"PYBIND11_MODULE(swgen, m) {}");
        write_source(&second, "gs.cpp", b"PYBIND11_MODULE(gs, m) {}");

        let modules = discover_modules(
            &[first, temp.path().join("missing"), second],
            "cpp",
        );

        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["gs", "swgen"]);
    }
}
