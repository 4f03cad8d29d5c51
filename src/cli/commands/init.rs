//! Initialize command.

use console::style;

use crate::config::Settings;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    if settings.llm.api_key.is_none() {
        println!("{} No completion API key configured", style("!").yellow());
        println!("  Set LLM_API_KEY (or GROQ_API_KEY) to enable analysis");
    }

    println!(
        "{} Initialized booklens in {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    Ok(())
}
