use std::io::{self, BufRead, Write};

use anyhow::Result;
use uuid::Uuid;

use headliner_core::Session;

pub async fn run(session: &Session, id: Uuid, yes: bool) -> Result<()> {
    let article = match session.saved_article(id) {
        Ok(article) => article,
        Err(_) => {
            println!("No saved article with id {}.", id);
            return Ok(());
        }
    };

    if !yes && !confirm(&article.title)? {
        println!("Cancelled.");
        return Ok(());
    }

    session.remove(&article).await;

    if session.saved().find(id).is_none() {
        println!("Deleted: {}", article.title);
    } else {
        println!("Could not delete '{}'.", article.title);
    }

    Ok(())
}

fn confirm(title: &str) -> Result<bool> {
    println!("{}", title);
    print!("Are you sure you want to delete this article? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
