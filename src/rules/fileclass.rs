/// Coarse classification of a file name, used to gate rules that only make
/// sense for particular file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Terraform and other declarative infrastructure definitions.
    Infrastructure,
    /// Container build files (Dockerfile and friends).
    Container,
    /// Everything else.
    General,
}

const INFRA_EXTENSIONS: &[&str] = &["tf", "tfvars", "hcl", "yaml", "yml"];

impl FileClass {
    #[must_use]
    pub fn of(file_name: &str) -> Self {
        if file_name == "Dockerfile"
            || file_name == "Containerfile"
            || file_name.ends_with(".dockerfile")
            || file_name.starts_with("Dockerfile.")
        {
            return Self::Container;
        }

        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext);
        if ext.is_some_and(|e| INFRA_EXTENSIONS.contains(&e)) {
            return Self::Infrastructure;
        }

        Self::General
    }
}

#[cfg(test)]
#[path = "fileclass_tests.rs"]
mod tests;
