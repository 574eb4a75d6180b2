use phonebook_cli::console::ScriptedConsole;
use phonebook_cli::directory::SearchQuery;
use phonebook_cli::fields::Field;
use phonebook_cli::storage::Storage;
use phonebook_cli::{Directory, DirectoryError, Outcome, Record, Settings};
use std::fs;
use std::num::NonZeroUsize;
use tempfile::TempDir;

fn setup() -> (TempDir, Directory) {
    let dir = TempDir::new().unwrap();
    let settings = Settings::default().with_storage_path(dir.path().join("phonebook.csv"));
    let directory = Directory::open(settings).unwrap();
    (dir, directory)
}

fn contact(surname: &str, first_name: &str) -> Record {
    Record::from_values([
        surname.into(),
        first_name.into(),
        "Ivanovich".into(),
        "Acme".into(),
        "+79991234567".into(),
        "89991234567".into(),
    ])
}

fn storage(directory: &Directory) -> Storage {
    Storage::new(&directory.settings().storage_path)
}

fn seed(directory: &Directory, records: &[Record]) {
    let mut rows = vec![Record::header()];
    rows.extend_from_slice(records);
    storage(directory).write_all(&rows).unwrap();
}

const IVANOV: [&str; 6] = [
    "Ivanov",
    "Ivan",
    "Ivanovich",
    "Acme",
    "+79991234567",
    "89991234567",
];

#[test]
fn test_open_creates_file_with_header() {
    let (_dir, directory) = setup();

    assert!(storage(&directory).file_exists());
    assert_eq!(storage(&directory).read_all().unwrap(), vec![Record::header()]);
    assert!(directory.records().unwrap().is_empty());
}

#[test]
fn test_add_appends_as_last_row() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Petrov", "Petr")]);
    let mut console = ScriptedConsole::new(IVANOV);

    let outcome = directory.add(&mut console).unwrap();

    let expected = Record::from_values(IVANOV.map(String::from));
    assert_eq!(outcome, Outcome::Added(expected.clone()));
    let rows = storage(&directory).read_all().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], Record::header());
    assert_eq!(rows.last(), Some(&expected));
    assert!(console.printed("Record added."));
}

#[test]
fn test_add_reprompts_until_value_is_valid() {
    let (_dir, directory) = setup();
    let mut console = ScriptedConsole::new([
        "Ivan0v",
        "",
        "Ivanov",
        "Ivan",
        "Ivanovich",
        "Acme 42",
        "Acme Widgets",
        "12345",
        "+79991234567",
        "89991234567",
    ]);

    directory.add(&mut console).unwrap();

    let records = directory.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].surname, "Ivanov");
    assert_eq!(records[0].organization, "Acme Widgets");
    let rejections = console
        .output()
        .iter()
        .filter(|l| *l == "Please enter valid data.")
        .count();
    assert_eq!(rejections, 4);
}

#[test]
fn test_add_gives_up_after_max_attempts() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::default()
        .with_storage_path(dir.path().join("phonebook.csv"))
        .with_max_attempts(2);
    let directory = Directory::open(settings).unwrap();
    let before = fs::read(storage(&directory).path()).unwrap();
    let mut console = ScriptedConsole::new(["Ivanov", "1", "2", "Ivan"]);

    let err = directory.add(&mut console).unwrap_err();

    assert!(matches!(
        err,
        DirectoryError::TooManyAttempts {
            field: Field::FirstName,
            attempts: 2
        }
    ));
    assert_eq!(fs::read(storage(&directory).path()).unwrap(), before);
}

#[test]
fn test_add_aborts_without_writing_when_input_closes() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Petrov", "Petr")]);
    let before = fs::read(storage(&directory).path()).unwrap();
    let mut console = ScriptedConsole::new(["Ivanov", "Ivan"]);

    let err = directory.add(&mut console).unwrap_err();

    assert!(matches!(err, DirectoryError::InputClosed));
    assert_eq!(fs::read(storage(&directory).path()).unwrap(), before);
}

#[test]
fn test_update_single_match_replaces_in_place() {
    let (_dir, directory) = setup();
    seed(
        &directory,
        &[
            contact("Petrov", "Petr"),
            contact("Ivanov", "Ivan"),
            contact("Sidorov", "Sidor"),
        ],
    );
    let mut console = ScriptedConsole::new([
        "Ivanov",
        "Ivanov",
        "Pavel",
        "Petrovich",
        "Globex",
        "84951234567",
        "+79997654321",
    ]);

    let outcome = directory.update(&mut console).unwrap();

    let updated = Record::from_values([
        "Ivanov".into(),
        "Pavel".into(),
        "Petrovich".into(),
        "Globex".into(),
        "84951234567".into(),
        "+79997654321".into(),
    ]);
    assert_eq!(
        outcome,
        Outcome::Updated {
            position: 2,
            record: updated.clone()
        }
    );
    let records = directory.records().unwrap();
    assert_eq!(
        records,
        vec![contact("Petrov", "Petr"), updated, contact("Sidorov", "Sidor")]
    );
    assert!(console.printed("Record updated successfully."));
}

#[test]
fn test_update_without_match_leaves_file_untouched() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Petrov", "Petr")]);
    let before = fs::read(storage(&directory).path()).unwrap();
    let mut console = ScriptedConsole::new(["Ivanov"]);

    let err = directory.update(&mut console).unwrap_err();

    assert!(matches!(err, DirectoryError::NotFound { ref surname } if surname == "Ivanov"));
    assert_eq!(fs::read(storage(&directory).path()).unwrap(), before);
}

#[test]
fn test_update_multiple_matches_uses_selection() {
    let (_dir, directory) = setup();
    seed(
        &directory,
        &[contact("Ivanov", "Ivan"), contact("Ivanov", "Petr")],
    );
    let mut input = vec!["Ivanov", "2"];
    input.extend(["Ivanov", "Oleg", "Olegovich", "Acme", "89990000000", "89991111111"]);
    let mut console = ScriptedConsole::new(input);

    let outcome = directory.update(&mut console).unwrap();

    assert!(matches!(outcome, Outcome::Updated { position: 2, .. }));
    assert!(console.printed("1. Ivanov, Ivan"));
    assert!(console.printed("2. Ivanov, Petr"));
    let records = directory.records().unwrap();
    assert_eq!(records[0], contact("Ivanov", "Ivan"));
    assert_eq!(records[1].first_name, "Oleg");
}

#[test]
fn test_update_duplicate_rows_resolve_to_first_copy() {
    let (_dir, directory) = setup();
    seed(
        &directory,
        &[
            contact("Ivanov", "Ivan"),
            contact("Petrov", "Petr"),
            contact("Ivanov", "Ivan"),
        ],
    );
    let mut input = vec!["Ivanov", "2"];
    input.extend(["Ivanov", "Oleg", "Olegovich", "Acme", "89990000000", "89991111111"]);
    let mut console = ScriptedConsole::new(input);

    let outcome = directory.update(&mut console).unwrap();

    assert!(matches!(outcome, Outcome::Updated { position: 1, .. }));
    let records = directory.records().unwrap();
    assert_eq!(records[0].first_name, "Oleg");
    assert_eq!(records[2], contact("Ivanov", "Ivan"));
}

#[test]
fn test_update_out_of_range_selection_aborts() {
    let (_dir, directory) = setup();
    seed(
        &directory,
        &[contact("Ivanov", "Ivan"), contact("Ivanov", "Petr")],
    );
    let before = fs::read(storage(&directory).path()).unwrap();

    for answer in ["3", "0", "first"] {
        let mut console = ScriptedConsole::new(["Ivanov", answer]);
        let err = directory.update(&mut console).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidSelection(ref a) if a == answer));
        assert_eq!(console.remaining(), 0);
    }
    assert_eq!(fs::read(storage(&directory).path()).unwrap(), before);
}

#[test]
fn test_update_scan_includes_header_row() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Petrov", "Petr")]);
    let mut input = vec!["Surname"];
    input.extend(IVANOV);
    let mut console = ScriptedConsole::new(input);

    let outcome = directory.update(&mut console).unwrap();

    assert!(matches!(outcome, Outcome::Updated { position: 0, .. }));
    let rows = storage(&directory).read_all().unwrap();
    assert_eq!(rows[0].surname, "Ivanov");
    assert_eq!(rows[1], contact("Petrov", "Petr"));
}

#[test]
fn test_search_finds_exact_match() {
    let (_dir, directory) = setup();
    seed(
        &directory,
        &[contact("Smith", "John"), contact("Jones", "Jane")],
    );
    let mut console = ScriptedConsole::new(["Surname", "Smith"]);

    let outcome = directory.search(&mut console).unwrap();

    assert_eq!(outcome, Outcome::Found(vec![contact("Smith", "John")]));
    assert!(console.printed("Found records:"));
    assert!(console.printed("Smith John Ivanovich Acme +79991234567 89991234567"));
}

#[test]
fn test_search_with_empty_values_finds_nothing() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Smith", "John")]);
    let mut console = ScriptedConsole::new(["Surname", ""]);

    let outcome = directory.search(&mut console).unwrap();

    assert_eq!(outcome, Outcome::Found(vec![]));
    assert!(console.printed("Nothing found!"));
}

#[test]
fn test_search_truncates_to_shorter_list() {
    let (_dir, directory) = setup();
    seed(
        &directory,
        &[contact("Smith", "John"), contact("Smith", "Anna")],
    );

    let found = directory
        .find(&SearchQuery::parse("surname, firstname", "Smith"))
        .unwrap();
    assert_eq!(found.len(), 2);

    let found = directory
        .find(&SearchQuery::parse("surname, firstname", "Smith, Anna"))
        .unwrap();
    assert_eq!(found, vec![contact("Smith", "Anna")]);
}

#[test]
fn test_search_values_are_case_sensitive() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Smith", "John")]);

    let found = directory
        .find(&SearchQuery::parse("Surname", "smith"))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_search_unknown_label_is_reported() {
    let (_dir, directory) = setup();
    seed(&directory, &[contact("Smith", "John")]);
    let mut console = ScriptedConsole::new(["Surname, Email", "Smith, x@y.z"]);

    let err = directory.search(&mut console).unwrap_err();

    assert!(matches!(err, DirectoryError::UnknownColumn(ref l) if l == "Email"));
}

#[test]
fn test_list_pages_with_partial_last_page() {
    let (_dir, directory) = setup();
    let names = ["Aa", "Bb", "Cc", "Dd", "Ee"];
    let records: Vec<Record> = (0..25)
        .map(|i| contact(names[i % 5], &"X".repeat(i + 1)))
        .collect();
    seed(&directory, &records);
    let mut console = ScriptedConsole::new(["", ""]);

    let outcome = directory.list(&mut console).unwrap();

    assert_eq!(outcome, Outcome::Listed { records: 25, pages: 3 });
    assert_eq!(console.prompts().len(), 2);
    assert_eq!(console.output().len(), 25);
    assert_eq!(console.output()[0], records[0].to_string());
    assert_eq!(console.output()[24], records[24].to_string());
}

#[test]
fn test_list_exact_multiple_reports_extra_page() {
    let (_dir, directory) = setup();
    let records: Vec<Record> = (0..10).map(|i| contact("Ivanov", &"Y".repeat(i + 1))).collect();
    seed(&directory, &records);
    let mut console = ScriptedConsole::default();

    let outcome = directory.list(&mut console).unwrap();

    assert_eq!(outcome, Outcome::Listed { records: 10, pages: 2 });
    assert!(console.prompts().is_empty());
    assert_eq!(console.output().len(), 10);
}

#[test]
fn test_list_respects_page_size_setting() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::default()
        .with_storage_path(dir.path().join("phonebook.csv"))
        .with_page_size(NonZeroUsize::new(2).unwrap());
    let directory = Directory::open(settings).unwrap();
    seed(
        &directory,
        &[
            contact("Aa", "Aa"),
            contact("Bb", "Bb"),
            contact("Cc", "Cc"),
        ],
    );
    let mut console = ScriptedConsole::new([""]);

    let outcome = directory.list(&mut console).unwrap();

    assert_eq!(outcome, Outcome::Listed { records: 3, pages: 2 });
    assert_eq!(console.prompts(), ["Press Enter to continue..."]);
}

#[test]
fn test_malformed_file_fails_every_operation() {
    let (_dir, directory) = setup();
    fs::write(storage(&directory).path(), "Surname,FirstName\nIvanov,Ivan\n").unwrap();

    assert!(directory.list(&mut ScriptedConsole::default()).is_err());
    assert!(directory.add(&mut ScriptedConsole::new(IVANOV)).is_err());
    assert!(matches!(
        directory.update(&mut ScriptedConsole::new(["Ivanov"])),
        Err(DirectoryError::Malformed(_))
    ));
}
