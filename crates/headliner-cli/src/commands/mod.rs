pub mod configure;
pub mod delete;
pub mod headlines;
pub mod open;
pub mod saved;
pub mod share;

use headliner_core::Article;

/// Print one article as a numbered list entry
fn print_article(position: usize, article: &Article, show_id: bool) {
    println!("{}", format_article(position, article, show_id));
}

fn format_article(position: usize, article: &Article, show_id: bool) -> String {
    let mut lines = vec![format!("{:>3}. {}", position, article.title)];
    if let Some(description) = &article.description {
        lines.push(format!("     {}", description));
    }
    lines.push(format!("     {}", article.url));
    if let Some(image) = &article.url_to_image {
        lines.push(format!("     image: {}", image));
    }
    if show_id {
        lines.push(format!("     id: {}", article.id));
    }
    lines.join("\n") + "\n"
}
