//! Checks that `src/` and `tests/unit/` mirror each other file for file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    // Harness roots and module lists only declare modules
    fn is_module_file(relative: &str) -> bool {
        relative == "lib.rs" || relative == "main.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path)?);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
        Ok(files)
    }

    // Paths relative to `root`, with module files left out
    fn mirrored_paths(root: &str) -> BTreeSet<String> {
        let root = Path::new(root);
        let files = rust_files(root).unwrap_or_else(|error| {
            assert!(!root.exists(), "Failed to scan {}: {error}", root.display());
            Vec::new()
        });

        files
            .iter()
            .filter_map(|path| path.strip_prefix(root).ok())
            .map(|relative| relative.to_string_lossy().replace('\\', "/"))
            .filter(|relative| !is_module_file(relative))
            .collect()
    }

    // Tests every source module has a unit test file at the same relative path
    // Verified by deleting tests/unit/spatial/lattice.rs
    #[test]
    fn test_every_module_has_unit_tests() {
        let tested = mirrored_paths(UNIT);
        let missing: Vec<String> = mirrored_paths(SRC)
            .into_iter()
            .filter(|path| !tested.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Modules without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by adding tests/unit/algorithm/heuristic.rs
    #[test]
    fn test_no_orphaned_unit_tests() {
        let sources = mirrored_paths(SRC);
        let orphaned: Vec<String> = mirrored_paths(UNIT)
            .into_iter()
            .filter(|path| !sources.contains(path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a module:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests each non-module test file declares at least one test
    // Verified by emptying tests/unit/io/progress.rs
    #[test]
    fn test_test_files_contain_tests() {
        let root = Path::new("tests");
        let files = rust_files(root).unwrap_or_default();

        let empty: Vec<String> = files
            .iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| !is_module_file(name))
            })
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test]:\n{}",
            empty.join("\n")
        );
    }
}
