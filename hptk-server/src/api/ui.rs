//! Tool pages
//!
//! A sidebar built from the tool registry plus one page per tool naming the
//! endpoint it drives. The pages are rendered on the fly; there are no
//! static assets.

use axum::{extract::Path, response::Html};
use hptk_common::{tools, Tool};

use crate::error::{ApiError, ApiResult};
use crate::forms::replacement::escape_html;

const STYLE: &str = "body{margin:0;font-family:sans-serif;display:flex}\
nav{width:240px;min-height:100vh;background:#f4f1ec;padding:16px}\
nav a{display:block;padding:8px;color:#333;text-decoration:none;border-radius:6px}\
nav a.current{background:#e2ddd4;font-weight:bold}\
main{padding:24px;flex:1}\
.card{border:1px solid #ddd;border-radius:8px;padding:16px;margin-bottom:12px}";

/// Endpoints behind each tool page
fn tool_endpoints(id: &str) -> &'static [&'static str] {
    match id {
        "hp-mandarin" => &["POST /api/translate"],
        "hp-email-drafter" => &["GET /api/draft/options", "POST /api/draft"],
        "hp-music-profile" => &["POST /api/profiles/parse"],
        "hp-replacement-form" => &["POST /api/replacement-form"],
        "hp-track-extractor" => &["POST /api/tracks/extract"],
        _ => &[],
    }
}

fn sidebar(current: Option<&str>) -> String {
    let mut nav = String::from("<nav><a href=\"/\"><strong>hp Toolkit</strong></a>");
    for tool in tools::all() {
        let class = if current == Some(tool.id) { " class=\"current\"" } else { "" };
        nav.push_str(&format!(
            "<a href=\"{}\"{}>{} {}</a>",
            escape_html(tool.route),
            class,
            tool.icon,
            escape_html(tool.name)
        ));
    }
    nav.push_str("</nav>");
    nav
}

fn page(title: &str, current: Option<&str>, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head><body>{}<main>{}</main></body></html>",
        escape_html(title),
        STYLE,
        sidebar(current),
        body
    )
}

fn tool_card(tool: &Tool) -> String {
    format!(
        "<div class=\"card\" style=\"border-left:6px solid {}\">\
         <h2><a href=\"{}\">{} {}</a></h2><p>{}</p></div>",
        escape_html(tool.color),
        escape_html(tool.route),
        tool.icon,
        escape_html(tool.name),
        escape_html(tool.description)
    )
}

/// GET /
pub async fn serve_index() -> Html<String> {
    let cards: String = tools::all().iter().map(tool_card).collect();
    Html(page("hp Toolkit", None, &format!("<h1>hp Toolkit</h1>{}", cards)))
}

/// GET /tools/:id
pub async fn serve_tool_page(Path(id): Path<String>) -> ApiResult<Html<String>> {
    let tool = tools::find(&id).ok_or_else(|| ApiError::NotFound(format!("Unknown tool: {}", id)))?;

    let endpoints: String = tool_endpoints(tool.id)
        .iter()
        .map(|e| format!("<li><code>{}</code></li>", escape_html(e)))
        .collect();
    let body = format!(
        "<h1>{} {}</h1><p>{}</p><h3>Endpoints</h3><ul>{}</ul>",
        tool.icon,
        escape_html(tool.name),
        escape_html(tool.description),
        endpoints
    );

    Ok(Html(page(tool.name, Some(tool.id), &body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_endpoints() {
        for tool in tools::all() {
            assert!(!tool_endpoints(tool.id).is_empty(), "{}", tool.id);
        }
    }

    #[test]
    fn test_sidebar_marks_current() {
        let nav = sidebar(Some("hp-track-extractor"));
        assert_eq!(nav.matches("class=\"current\"").count(), 1);
        assert!(nav.contains("<a href=\"/tools/hp-track-extractor\" class=\"current\">"));
        assert!(!sidebar(None).contains("current"));
    }
}
