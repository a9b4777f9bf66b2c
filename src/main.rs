use std::io::Write;

use lumbung::{
    executor::{
        insert::{Inserter, TableInserter},
        scan::Scanner,
    },
    repl::statement::{Statement, prepare_statement},
    storage::table::Table,
    types::error::DatabaseError,
};
use rustyline::{DefaultEditor, Result, error::ReadlineError};

const DEFAULT_DB_PATH: &str = "lumbung.db";
const HISTORY_FILE: &str = ".lumbung_history";

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let mut table = match Table::open(&path) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Failed to open database '{}': {}", path, err);
            std::process::exit(1);
        }
    };
    println!("Opened database '{}' ({} rows).", path, table.num_rows());

    let mut rl = DefaultEditor::new()?;
    let _ = rl.load_history(HISTORY_FILE);

    loop {
        match rl.readline("lumbung> ") {
            Ok(line) => {
                let command = line.trim().to_string();
                if command.is_empty() {
                    continue;
                }
                rl.add_history_entry(&command)?;

                if command.starts_with('.') {
                    if !process_meta_command(&command) {
                        break;
                    }
                    continue;
                }

                match prepare_statement(&command) {
                    Ok(statement) => execute_statement(statement, &mut table),
                    Err(err) => println!("{}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    if let Err(err) = table.close() {
        eprintln!("Failed to close database: {}", err);
        std::process::exit(1);
    }
    Ok(())
}

/// Handles a dot-prefixed meta command. Returns false when the REPL should
/// stop.
fn process_meta_command(command: &str) -> bool {
    match command {
        ".exit" | ".quit" => {
            println!("Goodbye!");
            false
        }
        ".help" => {
            println!(
                r#"
Available commands:
  insert <id> <username> <email>  - Store one row
  select                          - Print every stored row
  .help                           - Show this help message
  .clear                          - Clear the screen
  .exit, .quit                    - Flush to disk and exit

Use Up/Down arrows to navigate command history.
"#
            );
            true
        }
        ".clear" => {
            print!("\x1B[2J\x1B[1;1H");
            let _ = std::io::stdout().flush();
            true
        }
        _ => {
            println!("Unrecognized command '{}'", command);
            true
        }
    }
}

fn execute_statement(statement: Statement, table: &mut Table) {
    match statement {
        Statement::Insert(row) => {
            let mut inserter = TableInserter::new(table);
            match inserter.insert(&row) {
                Ok(()) => println!("Executed."),
                Err(DatabaseError::TableFull { .. }) => println!("Error: table full."),
                Err(err) => fatal(err),
            }
        }
        Statement::Select => {
            let mut scanner = table.create_scanner();
            loop {
                match scanner.scan() {
                    Ok(Some(row)) => println!("{}", row),
                    Ok(None) => break,
                    Err(err) => fatal(err),
                }
            }
            println!("Executed.");
        }
    }
}

/// I/O and invariant failures have no recovery path; report and terminate.
fn fatal(error: DatabaseError) -> ! {
    eprintln!("Fatal error: {}", error);
    std::process::exit(1);
}
