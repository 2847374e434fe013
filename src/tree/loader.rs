use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::{FileNode, TreeFilter};
use crate::error::Result;

/// Materializes a [`FileNode`] tree from a directory on disk.
///
/// File contents are read in parallel; files that are not valid UTF-8 are kept
/// in the tree with `content: None`. The resulting tree shape is deterministic:
/// folders first, then files, each sorted by name.
pub struct DirectoryLoader<F: TreeFilter> {
    filter: F,
    use_gitignore: bool,
}

impl<F: TreeFilter + Send + Sync> DirectoryLoader<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self {
            filter,
            use_gitignore: false,
        }
    }

    #[must_use]
    pub const fn with_gitignore(filter: F, use_gitignore: bool) -> Self {
        Self {
            filter,
            use_gitignore,
        }
    }

    /// Load the tree rooted at `root`.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or cannot be walked.
    pub fn load(&self, root: &Path) -> Result<FileNode> {
        if root.is_file() {
            let name = file_name_of(root);
            let content = read_text(root);
            return Ok(FileNode::File { name, content });
        }

        let files = self.collect_files(root);

        let loaded: Vec<(PathBuf, Option<String>)> = files
            .par_iter()
            .map(|rel| (rel.clone(), read_text(&root.join(rel))))
            .collect();

        let mut map = DirMap::default();
        for (rel, content) in loaded {
            let components: Vec<String> = rel
                .components()
                .filter_map(|c| c.as_os_str().to_str().map(String::from))
                .collect();
            map.insert(&components, content);
        }

        Ok(map.into_node(&root_display_name(root)))
    }

    fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        if self.use_gitignore {
            self.collect_with_gitignore(root)
        } else {
            self.collect_with_walkdir(root)
        }
    }

    fn collect_with_walkdir(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && self.filter.should_include(e.path()))
            .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }

    fn collect_with_gitignore(&self, root: &Path) -> Vec<PathBuf> {
        use ignore::WalkBuilder;

        WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| self.filter.should_include(e.path()))
            .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }
}

/// Intermediate nested map so the final child order is deterministic no matter
/// which walker produced the paths.
#[derive(Default)]
struct DirMap {
    dirs: BTreeMap<String, DirMap>,
    files: BTreeMap<String, Option<String>>,
}

impl DirMap {
    fn insert(&mut self, components: &[String], content: Option<String>) {
        match components {
            [] => {}
            [file] => {
                self.files.insert(file.clone(), content);
            }
            [dir, rest @ ..] => {
                self.dirs
                    .entry(dir.clone())
                    .or_default()
                    .insert(rest, content);
            }
        }
    }

    fn into_node(self, name: &str) -> FileNode {
        let mut children: Vec<FileNode> = self
            .dirs
            .into_iter()
            .map(|(dir_name, dir)| dir.into_node(&dir_name))
            .collect();
        children.extend(
            self.files
                .into_iter()
                .map(|(file_name, content)| FileNode::File {
                    name: file_name,
                    content,
                }),
        );
        FileNode::Folder {
            name: name.to_string(),
            children,
        }
    }
}

fn read_text(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    String::from_utf8(bytes).ok()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string()
}

fn root_display_name(root: &Path) -> String {
    dunce::canonicalize(root)
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .map_or_else(|| "project".to_string(), String::from)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
