// Library root
// -----------
// The binary (`main.rs`) builds a `Directory` once and hands it to the
// menu loop in `ui`. Everything the menu does is implemented here so it
// can be driven from tests with a scripted console.
//
// Module responsibilities:
// - `fields`: the six column labels and their validation rules.
// - `record`: one row of the storage file.
// - `storage`: whole-file CSV reads and writes.
// - `directory`: list, add, update and search over the stored records.
// - `console`: the blocking prompt/print seam (terminal or scripted).
// - `ui`: the numbered text menu.
// - `config`, `logging`, `error`: settings, diagnostics and the error type.
pub mod config;
pub mod console;
pub mod directory;
pub mod error;
pub mod fields;
pub mod logging;
pub mod record;
pub mod storage;
pub mod ui;

pub use config::Settings;
pub use directory::{Directory, Outcome};
pub use error::DirectoryError;
pub use record::Record;
