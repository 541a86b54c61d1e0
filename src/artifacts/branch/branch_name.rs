use crate::artifacts::branch::{INVALID_BRANCH_NAME_REGEX, REF_PREFIX};
use crate::errors::{Error, Result};

/// Validated branch name, relative to `refs/heads/` (e.g. `master`, `feature/login`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_state("branch name cannot be empty"));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX).map_err(|e| {
            Error::invalid_state(format!("invalid branch name regex {INVALID_BRANCH_NAME_REGEX}: {e}"))
        })?;

        if re.is_match(name) {
            return Err(Error::invalid_state(format!("invalid branch name: {name:?}")));
        }

        Ok(Self(name.to_string()))
    }

    /// Parse the target of a symbolic ref such as `refs/heads/master`
    pub fn try_parse_ref_path(ref_path: &str) -> Result<Self> {
        let name = ref_path.strip_prefix(REF_PREFIX).ok_or_else(|| {
            Error::invalid_state(format!(
                "symbolic ref must start with '{REF_PREFIX}', got {ref_path:?}"
            ))
        })?;

        Self::try_parse(name)
    }

    /// `refs/heads/<name>`
    pub fn to_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
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
