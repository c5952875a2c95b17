use serde_json::Value;

use crate::domain::stamp::Stamp;
use crate::web::handlers::ArticleView;

pub fn article_list_page(articles: &[ArticleView], prev_visit: &Stamp) -> String {
    let rows: String = articles
        .iter()
        .map(|a| {
            let title = html_escape::encode_text(&a.title);
            let badge = match &a.novelty {
                Value::Null => String::new(),
                Value::String(label) => format!(r#" <mark>{}</mark>"#, html_escape::encode_text(label)),
                other => format!(r#" <mark>{}</mark>"#, html_escape::encode_text(&other.to_string())),
            };
            format!("<li>{title}{badge}</li>\n")
        })
        .collect();
    let prev = html_escape::encode_text(&prev_visit.to_string()).into_owned();
    format!(
        r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Articles</title></head>
<body><h1>Articles</h1><p>Previous visit: {prev}</p>
<ul>
{rows}</ul></body></html>"#
    )
}

pub fn error_page(err: &str) -> String {
    let safe = html_escape::encode_text(err);
    format!(
        r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Error</title></head>
<body><h1>Oops!</h1><pre style="white-space:pre-wrap">{safe}</pre></body></html>"#
    )
}
