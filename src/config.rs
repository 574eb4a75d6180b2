// Runtime settings. The program takes no flags and reads no environment
// variables, so `Settings::default()` is what the binary runs with; the
// builder methods exist for tests and embedding.

use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Default storage file, relative to the working directory.
pub const DEFAULT_STORAGE_FILE: &str = "phonebook.csv";

/// Default number of records shown per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Menu input that ends the program.
pub const DEFAULT_EXIT_KEYWORD: &str = "exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path to the CSV file backing the directory.
    pub storage_path: PathBuf,
    /// Records per page when listing.
    pub page_size: NonZeroUsize,
    /// Literal menu input that terminates the loop.
    pub exit_keyword: String,
    /// Upper bound on re-prompts for a single invalid field.
    /// `None` keeps asking until valid input or end of input.
    pub max_attempts: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            page_size: DEFAULT_PAGE_SIZE,
            exit_keyword: DEFAULT_EXIT_KEYWORD.to_string(),
            max_attempts: None,
        }
    }
}

impl Settings {
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_exit_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.exit_keyword = keyword.into();
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }
}
