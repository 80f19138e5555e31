use axum::{body::Body, http::header, response::Response};
use chrono::{DateTime, Utc};

use crate::db;
use crate::db::queries::blogs as blog_queries;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn rfc822(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

/// Item description: the opening of the content, cut at a char boundary.
fn summarize(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let cut: String = content.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// GET /rss.xml - RSS 2.0 feed of published blogs
pub async fn rss_feed() -> Response {
    let pool = match db::get_pool() {
        Some(p) => p,
        None => {
            return Response::builder()
                .status(503)
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("Service unavailable"))
                .unwrap();
        }
    };

    let base_url =
        std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let site_title = std::env::var("SITE_TITLE").unwrap_or_else(|_| "Portfolio Blog".to_string());
    let site_description = std::env::var("SITE_DESCRIPTION")
        .unwrap_or_else(|_| "Latest articles and insights".to_string());

    let blogs = blog_queries::list_published_blogs(pool.as_ref(), 50)
        .await
        .unwrap_or_default();

    let mut items = String::new();
    for blog in &blogs {
        let post_url = format!("{}/blog/{}", base_url, blog.slug);
        let pub_date = blog.published_at.unwrap_or(blog.created_at);
        items.push_str(&format!(
            "    <item>\n\
                   <title>{}</title>\n\
                   <link>{}</link>\n\
                   <description>{}</description>\n\
                   <pubDate>{}</pubDate>\n\
                   <guid isPermaLink=\"true\">{}</guid>\n\
                 </item>\n",
            escape_xml(&blog.title),
            escape_xml(&post_url),
            escape_xml(&summarize(&blog.content, 280)),
            rfc822(&pub_date),
            escape_xml(&post_url),
        ));
    }

    let feed_url = format!("{}/rss.xml", base_url);
    let blog_url = format!("{}/blog", base_url);

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{}</title>
    <link>{}</link>
    <description>{}</description>
    <language>en-us</language>
    <atom:link href="{}" rel="self" type="application/rss+xml"/>
    <lastBuildDate>{}</lastBuildDate>
{}  </channel>
</rss>"#,
        escape_xml(&site_title),
        escape_xml(&blog_url),
        escape_xml(&site_description),
        escape_xml(&feed_url),
        blogs
            .first()
            .map(|b| rfc822(&b.published_at.unwrap_or(b.created_at)))
            .unwrap_or_default(),
        items,
    );

    Response::builder()
        .status(200)
        .header(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")
        .header(
            header::CACHE_CONTROL,
            "public, max-age=3600, stale-while-revalidate=600",
        )
        .body(Body::from(xml))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<title>"), "&lt;title&gt;");
        assert_eq!(escape_xml("\"quote\""), "&quot;quote&quot;");
    }

    #[test]
    fn test_rfc822_format() {
        use chrono::TimeZone;
        let dt = chrono::Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert!(rfc822(&dt).contains("2024"));
    }

    #[test]
    fn test_summarize_cuts_long_content() {
        let long = "word ".repeat(100);
        let short = summarize(&long, 20);
        assert!(short.chars().count() <= 21);
        assert!(short.ends_with('…'));
        assert_eq!(summarize("short post", 280), "short post");
    }
}
