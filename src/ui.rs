// UI layer: the text menu. It owns no state of its own; it reads a choice,
// hands it to the `Directory` and reports how the operation ended. Failed
// operations are reported and the loop carries on.

use crate::console::Console;
use crate::directory::{Directory, Outcome};
use crate::error::DirectoryError;
use anyhow::Result;
use std::io;
use tracing::debug;

/// A menu entry selected by its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Add,
    Update,
    Search,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::List),
            "2" => Some(MenuChoice::Add),
            "3" => Some(MenuChoice::Update),
            "4" => Some(MenuChoice::Search),
            _ => None,
        }
    }
}

/// Main interactive menu. Runs until the exit keyword is entered or input
/// is exhausted. Only console I/O failures escape; operation failures are
/// printed.
pub fn main_menu(directory: &Directory, console: &mut dyn Console) -> Result<()> {
    let exit_keyword = directory.settings().exit_keyword.clone();
    loop {
        print_menu(console, &exit_keyword)?;
        let input = match console.read_line("Your choice") {
            Ok(Some(input)) => input,
            Ok(None) => {
                debug!("input closed, leaving menu");
                break;
            }
            // The undecodable line has already been consumed.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                debug!(error = %e, "unreadable menu input");
                print_invalid_choice(console)?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if input == exit_keyword {
            console.print("You have left the phone book.")?;
            break;
        }

        let Some(choice) = MenuChoice::parse(&input) else {
            print_invalid_choice(console)?;
            continue;
        };

        let result = match choice {
            MenuChoice::List => directory.list(console),
            MenuChoice::Add => directory.add(console),
            MenuChoice::Update => directory.update(console),
            MenuChoice::Search => directory.search(console),
        };
        report(console, choice, result)?;
    }
    Ok(())
}

fn print_menu(console: &mut dyn Console, exit_keyword: &str) -> Result<()> {
    console.print("")?;
    console.print("Choose a menu item (enter its number):")?;
    console.print(" 1. Show the whole phone book;")?;
    console.print(" 2. Add a record;")?;
    console.print(" 3. Edit a record;")?;
    console.print(" 4. Find records.")?;
    console.print("")?;
    console.print(&format!("To quit, enter \"{exit_keyword}\"."))?;
    Ok(())
}

fn print_invalid_choice(console: &mut dyn Console) -> Result<()> {
    console.print("")?;
    console.print("!!! Invalid choice, pick a number from the list.")?;
    Ok(())
}

/// Turn an operation result into console output.
fn report(
    console: &mut dyn Console,
    choice: MenuChoice,
    result: Result<Outcome, DirectoryError>,
) -> Result<()> {
    match result {
        Ok(outcome) => debug!(?choice, ?outcome, "operation finished"),
        Err(e) if e.is_lookup() => console.print(&lookup_message(&e))?,
        Err(e) => {
            let action = match choice {
                MenuChoice::List => "listing records",
                MenuChoice::Add => "adding the record",
                MenuChoice::Update => "updating the record",
                MenuChoice::Search => "searching",
            };
            console.print(&format!("An error occurred while {action}: {e}"))?;
        }
    }
    Ok(())
}

fn lookup_message(err: &DirectoryError) -> String {
    match err {
        DirectoryError::NotFound { .. } => "Record not found.".to_string(),
        DirectoryError::InvalidSelection(_) => "Invalid record number.".to_string(),
        other => format!("Search failed: {other}"),
    }
}
