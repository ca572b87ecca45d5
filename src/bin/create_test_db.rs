use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_tracker::{Expense, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_EXPENSES: [(&str, f64, &str, &str); 10] = [
    ("Coffee", 3.5, "Food", "2024-01-01"),
    ("Bus fare", 2.0, "Transport", "2024-01-02"),
    ("Tea", 2.5, "food", "2024-01-03"),
    ("Groceries", 54.2, "Food", "2024-01-05"),
    ("Rent", 450.0, "Housing", "2024-01-07"),
    ("Train ticket", 12.8, "Transport", "2024-01-09"),
    ("Cinema", 18.0, "Entertainment", "2024-01-12"),
    ("Power bill", 96.45, "Utilities", "2024-01-15"),
    ("Refund", -20.0, "Entertainment", "2024-01-16"),
    ("Books", 31.99, "Education", "2024-01-20"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating {} sample expenses...", SAMPLE_EXPENSES.len());

    for (name, amount, category, date) in SAMPLE_EXPENSES {
        create_expense(Expense::build(name, amount, category, date), &conn)?;
    }

    println!("Success!");

    Ok(())
}
