//! Command-line interface for bookshelf.
//!
//! Thin front end over [`Catalog`]: each subcommand parses its arguments,
//! calls one catalog operation and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config;
use crate::domain::Book;
use crate::library::Catalog;

/// bookshelf - Personal book catalog
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (defaults to the configured location)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    Add {
        /// ISBN (must be unique)
        isbn: String,

        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        /// Publication year
        #[arg(short, long, allow_negative_numbers = true)]
        year: i32,

        /// Mark the book as already read
        #[arg(long)]
        read: bool,
    },

    /// Remove a book
    Remove {
        isbn: String,
    },

    /// Mark a book as read
    Read {
        isbn: String,
    },

    /// Mark a book as unread (keeps its rating)
    Unread {
        isbn: String,
    },

    /// Rate a book that has been read
    Rate {
        isbn: String,

        /// Score from 1 to 5
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// List books in the catalog
    List {
        /// Only books that have been read
        #[arg(long, conflicts_with = "unread")]
        read: bool,

        /// Only books not yet read
        #[arg(long)]
        unread: bool,

        /// Only books rated at least this much
        #[arg(long, conflicts_with_all = ["read", "unread"])]
        min_rating: Option<i64>,
    },

    /// Search the catalog
    Search(SearchArgs),

    /// Show a single book
    Show {
        isbn: String,
    },

    /// Show catalog totals
    Summary,

    /// Show resolved configuration (debug)
    Config,
}

/// Exactly one search criterion
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("criterion").required(true).args(["title", "author", "year"])))]
pub struct SearchArgs {
    /// Case-insensitive title substring
    #[arg(long)]
    pub title: Option<String>,

    /// Case-insensitive author substring
    #[arg(long)]
    pub author: Option<String>,

    /// Exact publication year
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i32>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Config => show_config(self.data),
            command => run_catalog_command(command, self.data),
        }
    }
}

/// Open the catalog and run a command against it
fn run_catalog_command(command: Commands, data: Option<PathBuf>) -> Result<()> {
    let mut catalog = open_catalog(data)?;

    match command {
        Commands::Add {
            isbn,
            title,
            author,
            year,
            read,
        } => {
            let book = Book::new(title, author, year, isbn)?.with_read(read);
            catalog.add(book)?;
            println!("Book added.");
        }
        Commands::Remove { isbn } => {
            let book = catalog.remove(&isbn)?;
            println!("Removed: {}", book.title());
        }
        Commands::Read { isbn } => {
            catalog.mark_read(&isbn)?;
            println!("Marked as read.");
        }
        Commands::Unread { isbn } => {
            catalog.mark_unread(&isbn)?;
            println!("Marked as unread.");
        }
        Commands::Rate { isbn, score } => {
            catalog.rate(&isbn, score)?;
            println!("Rating saved.");
        }
        Commands::List {
            read,
            unread,
            min_rating,
        } => {
            let books: Vec<&Book> = if let Some(threshold) = min_rating {
                catalog.list_by_minimum_rating(threshold)
            } else if read {
                catalog.list_read()
            } else if unread {
                catalog.list_unread()
            } else {
                catalog.list_all().iter().collect()
            };
            print_books(&books);
        }
        Commands::Search(args) => {
            let books = search(&catalog, args);
            print_books(&books);
        }
        Commands::Show { isbn } => match catalog.find_by_identifier(&isbn) {
            Some(book) => println!("{}", book),
            None => println!("Book not found."),
        },
        Commands::Summary => show_summary(&catalog),
        Commands::Config => unreachable!("config is handled before the catalog is opened"),
    }

    Ok(())
}

fn open_catalog(data: Option<PathBuf>) -> Result<Catalog> {
    match data {
        Some(path) => Catalog::open(&path)
            .with_context(|| format!("Failed to open catalog: {}", path.display())),
        None => Catalog::open_default(),
    }
}

fn search<'a>(catalog: &'a Catalog, args: SearchArgs) -> Vec<&'a Book> {
    if let Some(title) = args.title {
        catalog.find_by_title(&title)
    } else if let Some(author) = args.author {
        catalog.find_by_author(&author)
    } else if let Some(year) = args.year {
        catalog.find_by_year(year)
    } else {
        Vec::new()
    }
}

fn print_books(books: &[&Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    for book in books {
        println!("{}", book);
    }
}

fn show_summary(catalog: &Catalog) {
    let summary = catalog.summary_report();

    println!("Total books: {}", summary.total);
    println!("Read: {}", summary.read);
    println!("Unread: {}", summary.unread);
    match summary.mean_rating {
        Some(mean) => println!("Mean rating of read books: {:.2}", mean),
        None => println!("Mean rating of read books: -"),
    }
}

fn show_config(data: Option<PathBuf>) -> Result<()> {
    let resolved = config::config()?;

    println!("Home: {}", config::bookshelf_home()?.display());
    match data {
        Some(path) => println!("Catalog file: {} (from --data)", path.display()),
        None => println!("Catalog file: {}", resolved.data_file.display()),
    }
    match &resolved.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none)"),
    }

    Ok(())
}
