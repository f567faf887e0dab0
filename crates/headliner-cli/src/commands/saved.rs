use anyhow::Result;

use headliner_core::Session;

pub async fn run(session: &Session, json: bool) -> Result<()> {
    let articles = session.saved().articles().snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("No saved articles yet.");
        println!("\nTo save a headline, run:");
        println!("  headliner headlines --save <number>");
        return Ok(());
    }

    println!("Saved articles ({}):\n", articles.len());

    for (index, article) in articles.iter().enumerate() {
        super::print_article(index + 1, article, true);
    }

    Ok(())
}
