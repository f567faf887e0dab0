use anyhow::{bail, Result};

use headliner_core::Session;

pub async fn run(session: &Session, save: Option<usize>, json: bool) -> Result<()> {
    let articles = session.refresh_headlines().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
    } else if articles.is_empty() {
        println!("No headlines available.");
    } else {
        println!("Top headlines ({}):\n", articles.len());
        for (index, article) in articles.iter().enumerate() {
            super::print_article(index + 1, article, false);
        }
    }

    if let Some(position) = save {
        let Some(article) = position.checked_sub(1).and_then(|i| articles.get(i)) else {
            bail!("No headline at position {} ({} fetched)", position, articles.len());
        };

        session.bookmark(article).await;

        match session.saved_article(article.id) {
            Ok(saved) => println!("Saved: {} ({})", saved.title, saved.id),
            Err(_) => println!("Could not save '{}'.", article.title),
        }
    }

    Ok(())
}
