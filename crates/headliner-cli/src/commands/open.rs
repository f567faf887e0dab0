use anyhow::{Context, Result};
use uuid::Uuid;

use headliner_core::Session;

pub async fn run(session: &Session, id: Uuid) -> Result<()> {
    let article = session.saved_article(id)?;

    println!("Opening: {}", article.url);
    open::that(&article.url).with_context(|| format!("Failed to open {}", article.url))?;

    Ok(())
}
