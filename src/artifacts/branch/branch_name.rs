/// Validated branch name
///
/// Branch names become file names under `refs/heads`, so path separators and
/// the components the filesystem reserves are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        let name = name.trim();

        if name.is_empty() {
            return Err(anyhow::anyhow!("Branch name cannot be empty"));
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(anyhow::anyhow!("Invalid branch name: {}", name));
        }

        Ok(Self(name.to_string()))
    }

    /// Path of this branch's ref file relative to the repository metadata root
    pub fn as_ref_path(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
