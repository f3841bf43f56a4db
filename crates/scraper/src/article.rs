//! HTML title/body extraction and filename sanitization.

use std::sync::OnceLock;

use regex::Regex;

/// A parsed article: page title plus visible paragraph text.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: Option<String>,
    pub body: String,
}

fn re(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex"))
}

static SCRIPT_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_RE: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Pull the `<title>` and the text of all `<p>` elements out of raw HTML.
///
/// Regex-based on purpose: the archiver needs readable text, not a DOM.
pub fn extract_article(html: &str) -> Article {
    let script_re = re(&SCRIPT_RE, r"(?is)<(script|style|noscript)\b.*?</(script|style|noscript)>");
    let title_re = re(&TITLE_RE, r"(?is)<title[^>]*>(.*?)</title>");
    let paragraph_re = re(&PARAGRAPH_RE, r"(?is)<p\b[^>]*>(.*?)</p>");
    let tag_re = re(&TAG_RE, r"(?s)<[^>]+>");

    let stripped = script_re.replace_all(html, "");

    let title = title_re
        .captures(&stripped)
        .map(|c| clean_fragment(tag_re, &c[1]))
        .filter(|t| !t.is_empty());

    let mut paragraphs = Vec::new();
    for cap in paragraph_re.captures_iter(&stripped) {
        let text = clean_fragment(tag_re, &cap[1]);
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }

    Article {
        title,
        body: paragraphs.join("\n\n"),
    }
}

/// Strip inner tags, decode entities, collapse whitespace.
fn clean_fragment(tag_re: &Regex, fragment: &str) -> String {
    let no_tags = tag_re.replace_all(fragment, " ");
    let decoded = html_escape::decode_html_entities(&no_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build `blog_{NN}_{safe_title}.txt`: alphanumerics, spaces and
/// underscores survive, everything else becomes `_`; the title is cut to
/// 50 characters and spaces become underscores.
pub fn sanitized_filename(item_number: usize, title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let truncated: String = safe.chars().take(50).collect();
    format!(
        "blog_{:02}_{}.txt",
        item_number,
        truncated.replace(' ', "_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_and_paragraphs() {
        let html = "<html><head><title>My Post</title></head>\
                    <body><p>First paragraph.</p><p>Second <b>bold</b> paragraph.</p></body></html>";
        let article = extract_article(html);
        assert_eq!(article.title.as_deref(), Some("My Post"));
        assert_eq!(article.body, "First paragraph.\n\nSecond bold paragraph.");
    }

    #[test]
    fn scripts_and_styles_are_dropped() {
        let html = "<title>T</title><script>var x = '<p>not text</p>';</script>\
                    <style>p { color: red }</style><p>real text</p>";
        let article = extract_article(html);
        assert_eq!(article.body, "real text");
    }

    #[test]
    fn entities_are_decoded() {
        let html = "<title>A &amp; B</title><p>it&#39;s &lt;fine&gt;</p>";
        let article = extract_article(html);
        assert_eq!(article.title.as_deref(), Some("A & B"));
        assert_eq!(article.body, "it's <fine>");
    }

    #[test]
    fn missing_title_is_none() {
        let article = extract_article("<p>only body</p>");
        assert!(article.title.is_none());
        assert_eq!(article.body, "only body");
    }

    #[test]
    fn filename_replaces_punctuation_and_spaces() {
        let name = sanitized_filename(3, "Hello, World: a test!");
        assert_eq!(name, "blog_03_Hello__World__a_test_.txt");
    }

    #[test]
    fn filename_truncates_long_titles() {
        let long = "x".repeat(200);
        let name = sanitized_filename(12, &long);
        assert_eq!(name, format!("blog_12_{}.txt", "x".repeat(50)));
    }
}
