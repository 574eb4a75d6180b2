// Entrypoint for the phone book.
// - Keeps `main` small: open the directory and hand it to the menu loop.
// - Returns `anyhow::Result` so startup failures print with context.

use anyhow::Context;
use phonebook_cli::console::TermConsole;
use phonebook_cli::logging::init_logging;
use phonebook_cli::{ui::main_menu, Directory, Settings};

fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = Settings::default();
    let path = settings.storage_path.clone();
    let directory = Directory::open(settings)
        .with_context(|| format!("failed to open phone book at {}", path.display()))?;

    // Blocks until the user enters the exit keyword or stdin closes.
    main_menu(&directory, &mut TermConsole::new())?;
    Ok(())
}
