use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{AuditGuardError, Result};

pub trait TreeFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Extension allowlist plus glob exclude patterns.
///
/// An empty extension list admits every file. Entries without a dot that are
/// not plain extensions (e.g. `Dockerfile`) match against the full file name,
/// so extensionless build files can still be admitted by a narrowed list.
pub struct GlobFilter {
    extensions: Vec<String>,
    exclude_patterns: GlobSet,
}

impl GlobFilter {
    /// Create a new filter with the given extensions and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| AuditGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| AuditGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            extensions,
            exclude_patterns,
        })
    }

    /// A filter that admits everything except the given exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn admit_all(exclude_patterns: &[String]) -> Result<Self> {
        Self::new(Vec::new(), exclude_patterns)
    }

    fn name_is_admitted(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && self.extensions.iter().any(|e| e == ext)
        {
            return true;
        }

        // Entries like "Dockerfile" match extensionless files by full name.
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.extensions.iter().any(|e| e == name))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
    }
}

impl TreeFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.name_is_admitted(path) && !self.is_excluded(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
