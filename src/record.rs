// A single row of the storage file. The header row is represented by the
// same type so the directory can be read and written as one sequence.

use crate::fields::{Field, FIELD_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One contact entry with its six ordered fields.
///
/// Field order matches [`Field::ALL`] and the column order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub organization: String,
    pub work_phone: String,
    pub personal_phone: String,
}

impl Record {
    /// The fixed header row naming the six columns.
    pub fn header() -> Self {
        let [surname, first_name, patronymic, organization, work_phone, personal_phone] =
            Field::ALL.map(|f| f.header_label().to_string());
        Record {
            surname,
            first_name,
            patronymic,
            organization,
            work_phone,
            personal_phone,
        }
    }

    /// Build a record from values given in field order.
    pub fn from_values(values: [String; FIELD_COUNT]) -> Self {
        let [surname, first_name, patronymic, organization, work_phone, personal_phone] = values;
        Record {
            surname,
            first_name,
            patronymic,
            organization,
            work_phone,
            personal_phone,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Surname => &self.surname,
            Field::FirstName => &self.first_name,
            Field::Patronymic => &self.patronymic,
            Field::Organization => &self.organization,
            Field::WorkPhone => &self.work_phone,
            Field::PersonalPhone => &self.personal_phone,
        }
    }

    /// Value at 0-based column `index`, if the column exists.
    pub fn get(&self, index: usize) -> Option<&str> {
        Field::ALL.get(index).map(|f| self.field(*f))
    }

    /// All values in column order.
    pub fn values(&self) -> [&str; FIELD_COUNT] {
        Field::ALL.map(|f| self.field(f))
    }

    /// Values joined with `sep`, used for console output.
    pub fn join(&self, sep: &str) -> String {
        self.values().join(sep)
    }

    /// Position of the column whose header cell matches `label`
    /// case-insensitively. Only meaningful on the header row.
    pub fn column_of(&self, label: &str) -> Option<usize> {
        let wanted = label.to_lowercase();
        self.values()
            .iter()
            .position(|cell| cell.to_lowercase() == wanted)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(", "))
    }
}
