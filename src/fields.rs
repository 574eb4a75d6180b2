// Field labels and validation rules for the six contact columns.
// The column order here is the on-disk order and the order in which the
// add/update flows prompt for values.

use std::fmt;

/// Number of columns in every stored row, header included.
pub const FIELD_COUNT: usize = 6;

/// One of the six contact columns, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Surname,
    FirstName,
    Patronymic,
    Organization,
    WorkPhone,
    PersonalPhone,
}

impl Field {
    /// All fields in storage and prompt order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Surname,
        Field::FirstName,
        Field::Patronymic,
        Field::Organization,
        Field::WorkPhone,
        Field::PersonalPhone,
    ];

    /// Map a 1-based field identifier to its field.
    pub fn from_id(id: u8) -> Option<Field> {
        match id {
            1..=6 => Some(Self::ALL[usize::from(id) - 1]),
            _ => None,
        }
    }

    /// 1-based identifier of this field.
    pub fn id(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based column index in a stored row.
    pub fn index(self) -> usize {
        match self {
            Field::Surname => 0,
            Field::FirstName => 1,
            Field::Patronymic => 2,
            Field::Organization => 3,
            Field::WorkPhone => 4,
            Field::PersonalPhone => 5,
        }
    }

    /// Column name written to the header row of the storage file.
    pub fn header_label(self) -> &'static str {
        match self {
            Field::Surname => "Surname",
            Field::FirstName => "FirstName",
            Field::Patronymic => "Patronymic",
            Field::Organization => "Organization",
            Field::WorkPhone => "WorkPhone",
            Field::PersonalPhone => "PersonalPhone",
        }
    }

    /// Human readable label used when prompting for a value.
    pub fn prompt(self) -> &'static str {
        match self {
            Field::Surname => "Surname",
            Field::FirstName => "First name",
            Field::Patronymic => "Patronymic",
            Field::Organization => "Organization",
            Field::WorkPhone => "Work phone",
            Field::PersonalPhone => "Personal phone",
        }
    }

    /// Whether `value` is acceptable for this field.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Field::Surname | Field::FirstName | Field::Patronymic => is_alpha(value),
            // An empty organization has no words and therefore passes.
            Field::Organization => value.split_whitespace().all(is_alpha),
            Field::WorkPhone | Field::PersonalPhone => is_phone(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt())
    }
}

/// Validate `value` against the rule for the 1-based field identifier `id`.
///
/// Identifiers outside 1..=6 have no rule and always pass.
pub fn validate(id: u8, value: &str) -> bool {
    match Field::from_id(id) {
        Some(field) => field.accepts(value),
        None => true,
    }
}

fn is_alpha(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphabetic)
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn is_phone(value: &str) -> bool {
    let len = value.chars().count();
    if is_digits(value) {
        return len >= 11;
    }
    match value.strip_prefix('+') {
        Some(rest) => is_digits(rest) && len >= 12,
        None => false,
    }
}
