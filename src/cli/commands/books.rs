//! Book commands: get, analyze, list.

use console::style;

use crate::config::Settings;
use crate::models::BookRecord;
use crate::services::BookService;

use super::super::helpers::truncate;

/// Build the service after making sure the schema exists.
async fn open_service(settings: &Settings) -> anyhow::Result<BookService> {
    settings.ensure_directories()?;
    settings.create_db_context().init_schema().await?;
    BookService::from_settings(settings)
}

/// Show a book, fetching it on first request.
pub async fn cmd_get(settings: &Settings, id: i64, json: bool, text: bool) -> anyhow::Result<()> {
    let service = open_service(settings).await?;
    let book = service.get_book(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }

    print_header(&book);
    if text {
        match book.text {
            Some(ref body) => println!("\n{}", body),
            None => println!("\n{} No text available", style("!").yellow()),
        }
    }

    Ok(())
}

/// Analyze a stored book and print the analysis.
pub async fn cmd_analyze(settings: &Settings, id: i64, json: bool) -> anyhow::Result<()> {
    let service = open_service(settings).await?;
    let book = service.analyze_book(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }

    print_header(&book);
    let Some(ref analysis) = book.analysis else {
        return Ok(());
    };

    match book.analysis_result() {
        Some(result) => {
            println!("\n{}", style("Summary").bold());
            println!("  {}", result.summary);
            println!("\n{}", style("Themes").bold());
            for theme in &result.themes {
                println!("  - {}", theme);
            }
            println!("\n{}", style("Main characters").bold());
            for character in &result.main_characters {
                println!("  - {}: {}", character.name, character.description);
            }
            println!("\n{}", style("Writing style").bold());
            println!("  {}", result.writing_style);
        }
        // Partial analyses are shown as stored
        None => println!("\n{}", serde_json::to_string_pretty(analysis)?),
    }

    Ok(())
}

/// List stored books.
pub async fn cmd_list(settings: &Settings) -> anyhow::Result<()> {
    let service = open_service(settings).await?;
    let books = service.list_books().await?;

    if books.is_empty() {
        println!(
            "{} No books cached yet. Run 'booklens get <id>' first.",
            style("!").yellow()
        );
        return Ok(());
    }

    println!("\n{}", style("Cached Books").bold());
    println!("{}", "-".repeat(78));
    println!("{:<8} {:<36} {:<24} Analyzed", "ID", "Title", "Authors");
    println!("{}", "-".repeat(78));

    for book in &books {
        let analyzed = if book.is_analyzed() {
            style("yes").green()
        } else {
            style("no").dim()
        };
        println!(
            "{:<8} {:<36} {:<24} {}",
            book.id,
            truncate(&book.title, 35),
            truncate(&book.authors, 23),
            analyzed
        );
    }

    Ok(())
}

fn print_header(book: &BookRecord) {
    println!("{} {}", style(format!("#{}", book.id)).cyan(), style(&book.title).bold());
    let authors = book.author_list();
    if !authors.is_empty() {
        println!("  Authors:   {}", authors.join("; "));
    }
    let languages = book.language_list();
    if !languages.is_empty() {
        println!("  Languages: {}", languages.join(", "));
    }
    let chars = book.text.as_ref().map(|t| t.chars().count()).unwrap_or(0);
    println!("  Text:      {} characters", chars);
}
