// Directory manager: the four user-facing operations over the storage
// file. Nothing is cached between calls; every operation starts from a
// fresh read and mutating operations finish with a full rewrite.

use crate::config::Settings;
use crate::console::Console;
use crate::error::{DirectoryError, Result};
use crate::fields::{Field, FIELD_COUNT};
use crate::record::Record;
use crate::storage::Storage;
use std::num::NonZeroUsize;
use std::ops::Range;
use tracing::{debug, info};

const INVALID_DATA: &str = "Please enter valid data.";

/// What a successful operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Records were printed over `pages` pages.
    Listed { records: usize, pages: usize },
    /// A record was appended.
    Added(Record),
    /// The row at `position` (0 is the header row) was replaced.
    Updated { position: usize, record: Record },
    /// Records matching a search, possibly none.
    Found(Vec<Record>),
}

/// The contact directory backed by a single CSV file.
#[derive(Debug)]
pub struct Directory {
    storage: Storage,
    settings: Settings,
}

impl Directory {
    /// Open the directory described by `settings`, creating the storage
    /// file with only a header if it does not exist yet.
    pub fn open(settings: Settings) -> Result<Self> {
        let storage = Storage::new(&settings.storage_path);
        storage.ensure_file()?;
        Ok(Directory { storage, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current data records, header excluded.
    pub fn records(&self) -> Result<Vec<Record>> {
        let mut rows = self.storage.read_all()?;
        rows.remove(0);
        Ok(rows)
    }

    /// Print every record page by page, waiting for the user between pages.
    pub fn list(&self, console: &mut dyn Console) -> Result<Outcome> {
        let records = self.records()?;
        let pages = page_ranges(records.len(), self.settings.page_size);

        for page in &pages {
            for record in &records[page.clone()] {
                console.print(&record.to_string())?;
            }
            if page.end < records.len() {
                console
                    .read_line("Press Enter to continue...")?
                    .ok_or(DirectoryError::InputClosed)?;
            }
        }

        Ok(Outcome::Listed {
            records: records.len(),
            pages: pages.len(),
        })
    }

    /// Prompt for a new record and append it to the file.
    pub fn add(&self, console: &mut dyn Console) -> Result<Outcome> {
        let mut rows = self.storage.read_all()?;
        console.print("")?;
        console.print("== Adding a new record ==")?;
        console.print("")?;

        let record = self.read_record(console, |field| field.prompt().to_string())?;
        rows.push(record.clone());
        self.storage.write_all(&rows)?;

        info!(surname = %record.surname, "record added");
        console.print("Record added.")?;
        Ok(Outcome::Added(record))
    }

    /// Find a record by surname and replace it with freshly entered values.
    ///
    /// The scan covers every row including the header. When the chosen
    /// record has identical copies, the first equal row is replaced.
    pub fn update(&self, console: &mut dyn Console) -> Result<Outcome> {
        let mut rows = self.storage.read_all()?;
        console.print("")?;
        console.print("== Updating a record ==")?;
        console.print("")?;

        let surname = console
            .read_line("Enter the surname to search for")?
            .ok_or(DirectoryError::InputClosed)?;

        let hits: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.surname == surname)
            .map(|(i, _)| i)
            .collect();

        let hit = match hits.as_slice() {
            [] => {
                debug!(%surname, "update target not found");
                return Err(DirectoryError::NotFound { surname });
            }
            [only] => *only,
            many => {
                console.print("Several records found:")?;
                for (n, &i) in many.iter().enumerate() {
                    console.print(&format!("{}. {}", n + 1, rows[i]))?;
                }
                let answer = console
                    .read_line("Record number to update")?
                    .ok_or(DirectoryError::InputClosed)?;
                match parse_selection(&answer, many.len()) {
                    Some(choice) => many[choice - 1],
                    None => {
                        debug!(%answer, matches = many.len(), "invalid record number");
                        return Err(DirectoryError::InvalidSelection(answer));
                    }
                }
            }
        };

        // Resolve by value, not by scan index: duplicates collapse onto the
        // first equal row.
        let position = rows.iter().position(|r| *r == rows[hit]).unwrap_or(hit);

        let record = self.read_record(console, |field| format!("New value for {field}"))?;
        rows[position] = record.clone();
        self.storage.write_all(&rows)?;

        info!(position, surname = %record.surname, "record updated");
        console.print("Record updated successfully.")?;
        Ok(Outcome::Updated { position, record })
    }

    /// Prompt for field labels and values and print the matching records.
    pub fn search(&self, console: &mut dyn Console) -> Result<Outcome> {
        let keys = console
            .read_line("Fields to search by (comma separated)")?
            .ok_or(DirectoryError::InputClosed)?;
        let values = console
            .read_line("Values to search for (comma separated)")?
            .ok_or(DirectoryError::InputClosed)?;

        let found = self.find(&SearchQuery::parse(&keys, &values))?;

        if found.is_empty() {
            console.print("")?;
            console.print("Nothing found!")?;
        } else {
            console.print("Found records:")?;
            console.print("")?;
            for record in &found {
                console.print(&record.join(" "))?;
            }
        }
        Ok(Outcome::Found(found))
    }

    /// Records matching every criterion of `query`, in file order.
    pub fn find(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        let rows = self.storage.read_all()?;
        let (header, records) = rows
            .split_first()
            .ok_or_else(|| DirectoryError::Malformed("missing header row".into()))?;

        let criteria = query.resolve(header).inspect_err(|e| {
            debug!(error = %e, "search rejected");
        })?;

        Ok(records
            .iter()
            .filter(|r| criteria.matches(r))
            .cloned()
            .collect())
    }

    fn read_record<F>(&self, console: &mut dyn Console, prompt: F) -> Result<Record>
    where
        F: Fn(Field) -> String,
    {
        let mut values: [String; FIELD_COUNT] = Default::default();
        for field in Field::ALL {
            values[field.index()] = self.read_field(console, field, &prompt(field))?;
        }
        Ok(Record::from_values(values))
    }

    fn read_field(&self, console: &mut dyn Console, field: Field, prompt: &str) -> Result<String> {
        let mut attempts = 0;
        loop {
            let value = console
                .read_line(prompt)?
                .ok_or(DirectoryError::InputClosed)?;
            if field.accepts(&value) {
                return Ok(value);
            }
            attempts += 1;
            console.print(INVALID_DATA)?;
            if self.settings.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(DirectoryError::TooManyAttempts { field, attempts });
            }
        }
    }
}

/// Row ranges of each listing page.
///
/// The page count is `num_records / page_size + 1`, so an exact multiple of
/// the page size yields a trailing empty page.
pub fn page_ranges(num_records: usize, page_size: NonZeroUsize) -> Vec<Range<usize>> {
    let size = page_size.get();
    let pages = num_records / size + 1;
    (0..pages)
        .map(|page| {
            let start = page * size;
            start..(start + size).min(num_records)
        })
        .collect()
}

fn parse_selection(answer: &str, count: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
}

/// Search input as typed: comma separated labels and values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keys: Vec<String>,
    values: Vec<String>,
}

impl SearchQuery {
    /// Split both lists on commas. Labels are trimmed and capitalized,
    /// values are only trimmed.
    pub fn parse(keys: &str, values: &str) -> Self {
        SearchQuery {
            keys: keys.split(',').map(|k| capitalize(k.trim())).collect(),
            values: values.split(',').map(|v| v.trim().to_string()).collect(),
        }
    }

    /// Map every label to a header column, then pair columns with values
    /// positionally. Extra labels or values beyond the shorter list are
    /// dropped, but every label must still name a column.
    pub fn resolve(&self, header: &Record) -> Result<Criteria> {
        let columns = self
            .keys
            .iter()
            .map(|key| {
                header
                    .column_of(key)
                    .ok_or_else(|| DirectoryError::UnknownColumn(key.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Criteria {
            pairs: columns.into_iter().zip(self.values.iter().cloned()).collect(),
        })
    }
}

/// Resolved `(column, value)` pairs that a record must all satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pairs: Vec<(usize, String)>,
}

impl Criteria {
    pub fn matches(&self, record: &Record) -> bool {
        self.pairs
            .iter()
            .all(|(column, value)| record.get(*column) == Some(value.as_str()))
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
