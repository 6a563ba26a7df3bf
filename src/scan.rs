//! src/scan.rs

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker prefix inside a linked working copy's `.git` redirect file.
const GIT_LINK_PREFIX: &str = "gitdir:";

/// Finds every git working copy under `base`, including `base` itself when
/// it qualifies.
///
/// A directory holding a `.git` subdirectory is a standard working copy; a
/// directory holding a `.git` file whose contents start with `gitdir:` is a
/// linked one (submodule or worktree checkout). Traversal continues into
/// working copies so nested repositories are found too, but never descends
/// into a `.git` directory itself. Entries sort by file name so discovery
/// order is stable across runs.
pub fn find_git_repos(base: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(base)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut repos = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Unreadable directories don't abort the scan.
                log::debug!("scan: {err}");
                continue;
            }
        };
        if !entry.file_type().map_or(false, |ft| ft.is_dir()) {
            continue;
        }
        if is_git_repo(entry.path()) {
            repos.push(entry.path().to_path_buf());
        }
    }
    repos
}

/// A `.git` directory wins over a `.git` file in the same place.
fn is_git_repo(dir: &Path) -> bool {
    let marker = dir.join(".git");
    match fs::metadata(&marker) {
        Ok(meta) if meta.is_dir() => true,
        Ok(meta) if meta.is_file() => has_git_link(&marker),
        _ => false,
    }
}

/// Reads a candidate `.git` redirect file. Anything unreadable or non-text
/// counts as "not a repository marker".
fn has_git_link(marker: &Path) -> bool {
    match fs::read(marker) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => content.trim().starts_with(GIT_LINK_PREFIX),
            Err(_) => false,
        },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mkdir(path: &Path) {
        fs::create_dir_all(path).expect("Failed to create test directory");
    }

    #[test]
    fn finds_standard_and_linked_repos() {
        let base = tempdir().unwrap();
        let root = base.path();
        mkdir(&root.join("alpha/.git"));
        mkdir(&root.join("beta"));
        fs::write(root.join("beta/.git"), "gitdir: ../.git/modules/beta\n").unwrap();
        mkdir(&root.join("gamma/docs"));

        let repos = find_git_repos(root);
        assert_eq!(repos, vec![root.join("alpha"), root.join("beta")]);
    }

    #[test]
    fn base_dir_itself_qualifies() {
        let base = tempdir().unwrap();
        mkdir(&base.path().join(".git"));
        mkdir(&base.path().join("src"));

        let repos = find_git_repos(base.path());
        assert_eq!(repos, vec![base.path().to_path_buf()]);
    }

    #[test]
    fn nested_repository_inside_repository_is_found() {
        let base = tempdir().unwrap();
        let root = base.path();
        mkdir(&root.join("outer/.git"));
        mkdir(&root.join("outer/vendor/inner/.git"));

        let repos = find_git_repos(root);
        assert_eq!(
            repos,
            vec![root.join("outer"), root.join("outer/vendor/inner")]
        );
    }

    #[test]
    fn never_descends_into_control_directories() {
        let base = tempdir().unwrap();
        let root = base.path();
        mkdir(&root.join("repo/.git/modules/dep"));
        fs::write(root.join("repo/.git/modules/dep/config"), "[core]\n").unwrap();

        let repos = find_git_repos(root);
        assert_eq!(repos, vec![root.join("repo")]);
        assert!(repos
            .iter()
            .all(|p| p.components().all(|c| c.as_os_str() != ".git")));
    }

    #[test]
    fn non_link_control_file_is_not_a_repository() {
        let base = tempdir().unwrap();
        let root = base.path();
        mkdir(&root.join("fake"));
        fs::write(root.join("fake/.git"), "just a file that happens to be named .git").unwrap();

        assert!(find_git_repos(root).is_empty());
    }

    #[test]
    fn binary_control_file_is_skipped_without_aborting() {
        let base = tempdir().unwrap();
        let root = base.path();
        mkdir(&root.join("binary"));
        fs::write(root.join("binary/.git"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        mkdir(&root.join("real/.git"));

        let repos = find_git_repos(root);
        assert_eq!(repos, vec![root.join("real")]);
    }

    #[test]
    fn link_marker_tolerates_surrounding_whitespace() {
        let base = tempdir().unwrap();
        let root = base.path();
        mkdir(&root.join("sub"));
        fs::write(root.join("sub/.git"), "\n  gitdir: /somewhere/else\n").unwrap();

        let repos = find_git_repos(root);
        assert_eq!(repos, vec![root.join("sub")]);
    }
}
