use anyhow::Result;
use uuid::Uuid;

use headliner_core::Session;

pub async fn run(session: &Session, id: Uuid) -> Result<()> {
    let article = session.saved_article(id)?;
    println!("{}", article.share_text());
    Ok(())
}
