//! Configuration options for the transact store.

use std::path::PathBuf;

/// Configuration options for a store session.
#[derive(Debug, Clone)]
pub struct Options {
    /// Path of the JSON snapshot holding the global store.
    /// Default: `data.json`
    pub data_file: PathBuf,

    /// Load the snapshot file on startup if it exists.
    /// Default: true
    pub load_on_start: bool,

    /// Save the global store to the snapshot file on shutdown.
    /// Default: true
    pub save_on_exit: bool,

    /// How a committed scope is merged into the next store out.
    /// Default: CommitPolicy::MergePresent
    pub commit_policy: CommitPolicy,

    /// Prompt written before each command is read.
    /// Default: "> "
    pub prompt: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            load_on_start: true,
            save_on_exit: true,
            commit_policy: CommitPolicy::default(),
            prompt: "> ".to_string(),
        }
    }
}

/// Merge strategies applied when a scope is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// Copy every key present in the committed scope into its parent.
    /// Keys deleted inside the scope are not removed from the parent.
    #[default]
    MergePresent,

    /// Like `MergePresent`, but keys deleted inside the scope (and not set
    /// again afterwards) are also deleted from the parent.
    PropagateDeletes,
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the snapshot file path.
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets whether the snapshot is loaded on startup.
    pub fn load_on_start(mut self, value: bool) -> Self {
        self.load_on_start = value;
        self
    }

    /// Sets whether the global store is saved on shutdown.
    pub fn save_on_exit(mut self, value: bool) -> Self {
        self.save_on_exit = value;
        self
    }

    /// Sets the commit policy.
    pub fn commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.commit_policy = policy;
        self
    }

    /// Sets the prompt string.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(crate::Error::invalid_argument("data_file must not be empty"));
        }
        if self.data_file.is_dir() {
            return Err(crate::Error::invalid_argument(format!(
                "data_file is a directory: {:?}",
                self.data_file
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();
        assert_eq!(opts.data_file, PathBuf::from("data.json"));
        assert!(opts.load_on_start);
        assert!(opts.save_on_exit);
        assert_eq!(opts.commit_policy, CommitPolicy::MergePresent);
        assert_eq!(opts.prompt, "> ");
    }

    #[test]
    fn test_options_builder() {
        let opts = Options::new()
            .data_file("/tmp/other.json")
            .save_on_exit(false)
            .commit_policy(CommitPolicy::PropagateDeletes)
            .prompt("");

        assert_eq!(opts.data_file, PathBuf::from("/tmp/other.json"));
        assert!(!opts.save_on_exit);
        assert_eq!(opts.commit_policy, CommitPolicy::PropagateDeletes);
        assert!(opts.prompt.is_empty());
    }

    #[test]
    fn test_options_validation() {
        let opts = Options::default();
        assert!(opts.validate().is_ok());

        let opts = Options::default().data_file("");
        assert!(opts.validate().is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let opts = Options::default().data_file(dir.path());
        assert!(opts.validate().is_err());
    }
}
