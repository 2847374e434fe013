mod filter;
mod loader;

pub use filter::{GlobFilter, TreeFilter};
pub use loader::DirectoryLoader;

use serde::{Deserialize, Serialize};

/// One node of an in-memory project tree.
///
/// Trees are constructed externally (disk walk or JSON snapshot) and are
/// treated as read-only by every analysis routine. A file whose content could
/// not be decoded as UTF-8 carries `content: None` and is skipped by both the
/// scanner and test discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<FileNode>,
    },
}

/// A file yielded by a tree walk: slash-joined path from the root, the bare
/// file name, and the decoded content (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry<'a> {
    pub path: String,
    pub name: &'a str,
    pub content: Option<&'a str>,
}

impl FileNode {
    #[must_use]
    pub fn file(name: &str, content: &str) -> Self {
        Self::File {
            name: name.to_string(),
            content: Some(content.to_string()),
        }
    }

    /// A file that could not be decoded as text.
    #[must_use]
    pub fn undecodable(name: &str) -> Self {
        Self::File {
            name: name.to_string(),
            content: None,
        }
    }

    #[must_use]
    pub fn folder(name: &str, children: Vec<Self>) -> Self {
        Self::Folder {
            name: name.to_string(),
            children,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// All files in depth-first pre-order. Paths are relative to the root:
    /// the root folder's own name is not part of any path.
    #[must_use]
    pub fn walk_files(&self) -> Vec<FileEntry<'_>> {
        let mut entries = Vec::new();
        match self {
            Self::File { name, content } => entries.push(FileEntry {
                path: name.clone(),
                name,
                content: content.as_deref(),
            }),
            Self::Folder { children, .. } => {
                for child in children {
                    child.collect_files("", &mut entries);
                }
            }
        }
        entries
    }

    fn collect_files<'a>(&'a self, prefix: &str, entries: &mut Vec<FileEntry<'a>>) {
        let path = if prefix.is_empty() {
            self.name().to_string()
        } else {
            format!("{prefix}/{}", self.name())
        };

        match self {
            Self::File { name, content } => entries.push(FileEntry {
                path,
                name,
                content: content.as_deref(),
            }),
            Self::Folder { children, .. } => {
                for child in children {
                    child.collect_files(&path, entries);
                }
            }
        }
    }

    /// Look up a file's content by its slash-joined path.
    #[must_use]
    pub fn content_at(&self, path: &str) -> Option<&str> {
        self.walk_files()
            .into_iter()
            .find(|e| e.path == path)
            .and_then(|e| e.content)
    }

    /// Content of the first file (in traversal order) with the given name.
    #[must_use]
    pub fn content_of(&self, file_name: &str) -> Option<&str> {
        self.walk_files()
            .into_iter()
            .find(|e| e.name == file_name)
            .and_then(|e| e.content)
    }

    /// Total number of files in the tree (folders excluded).
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::File { .. } => 1,
            Self::Folder { children, .. } => children.iter().map(Self::file_count).sum(),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
