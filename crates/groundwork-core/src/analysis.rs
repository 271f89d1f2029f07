//! Shallow structural analysis of a scraped webpage.
//!
//! The scan is intentionally regex-shallow: title, meta description, the
//! h1/h2 text lists, a paragraph count, and a handful of basic issues. It
//! feeds the idea string used to seed blueprint generation for
//! `plan create --url`.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GroundworkError, Result};

/// Browser-like User-Agent; some sites refuse the default reqwest one.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Raw HTML fetched from a URL.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
    pub status_code: u16,
}

/// Result of the shallow structure scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PageAnalysis {
    pub title: Option<String>,
    pub description: Option<String>,
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub p_count: usize,
    pub basic_issues: Vec<String>,
}

impl PageAnalysis {
    /// Condense the analysis into an idea string suitable for blueprint
    /// generation.
    pub fn idea_text(&self, url: &str) -> String {
        match (&self.title, &self.description) {
            (Some(title), Some(description)) => format!("{title}: {description}"),
            (Some(title), None) => title.clone(),
            (None, Some(description)) => description.clone(),
            (None, None) => url.to_string(),
        }
    }
}

/// Fetch raw HTML from a URL.
pub async fn fetch_page(url: &str) -> Result<FetchedPage> {
    let response = reqwest::Client::new()
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| GroundworkError::http_error(format!("Failed to fetch {url}"), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GroundworkError::Api(format!(
            "HTTP {} fetching {url}",
            status.as_u16()
        )));
    }

    let html = response
        .text()
        .await
        .map_err(|e| GroundworkError::http_error(format!("Failed to read body of {url}"), e))?;

    Ok(FetchedPage {
        url: url.to_string(),
        html,
        status_code: status.as_u16(),
    })
}

/// Analyse basic HTML structure.
pub fn analyse(html: &str) -> PageAnalysis {
    let title = first_capture(html, r"(?is)<title[^>]*>(.*?)</title>")
        .map(|t| strip_tags(&t))
        .filter(|t| !t.is_empty());

    let description = meta_description(html).filter(|d| !d.is_empty());

    let h1 = heading_texts(html, r"(?is)<h1[^>]*>(.*?)</h1>");
    let h2 = heading_texts(html, r"(?is)<h2[^>]*>(.*?)</h2>");

    let p_count = Regex::new(r"(?i)<p[\s>]")
        .expect("paragraph pattern is valid")
        .find_iter(html)
        .count();

    let mut basic_issues = Vec::new();
    if title.is_none() {
        basic_issues.push("missing title".to_string());
    }
    if description.is_none() {
        basic_issues.push("missing meta description".to_string());
    }
    if h1.is_empty() {
        basic_issues.push("no H1 tags".to_string());
    }
    if h1.len() > 1 {
        basic_issues.push("multiple H1 tags".to_string());
    }

    PageAnalysis {
        title,
        description,
        h1,
        h2,
        p_count,
        basic_issues,
    }
}

fn first_capture(html: &str, pattern: &str) -> Option<String> {
    Regex::new(pattern)
        .expect("analysis pattern is valid")
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn heading_texts(html: &str, pattern: &str) -> Vec<String> {
    Regex::new(pattern)
        .expect("analysis pattern is valid")
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| strip_tags(m.as_str()))
        .collect()
}

fn meta_description(html: &str) -> Option<String> {
    let tag = first_match(html, r#"(?is)<meta[^>]*name\s*=\s*["']description["'][^>]*>"#)?;
    first_capture(&tag, r#"(?is)content\s*=\s*["']([^"']*)["']"#)
}

fn first_match(html: &str, pattern: &str) -> Option<String> {
    Regex::new(pattern)
        .expect("analysis pattern is valid")
        .find(html)
        .map(|m| m.as_str().to_string())
}

/// Drop nested tags and collapse whitespace, approximating an element's
/// visible text.
fn strip_tags(fragment: &str) -> String {
    let without_tags = Regex::new(r"(?s)<[^>]*>")
        .expect("tag pattern is valid")
        .replace_all(fragment, " ");
    without_tags.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><head>
        <title>Corner Bakery</title>
        <meta name="description" content="Fresh bread daily">
        </head><body>
        <h1>Welcome <em>home</em></h1>
        <h2>Hours</h2><h2>Menu</h2>
        <p>One</p><p>Two</p><p>Three</p>
        </body></html>"#;

    #[test]
    fn extracts_structure() {
        let analysis = analyse(SAMPLE);
        assert_eq!(analysis.title.as_deref(), Some("Corner Bakery"));
        assert_eq!(analysis.description.as_deref(), Some("Fresh bread daily"));
        assert_eq!(analysis.h1, vec!["Welcome home"]);
        assert_eq!(analysis.h2, vec!["Hours", "Menu"]);
        assert_eq!(analysis.p_count, 3);
        assert!(analysis.basic_issues.is_empty());
    }

    #[test]
    fn flags_missing_metadata() {
        let analysis = analyse("<html><body><p>bare</p></body></html>");
        assert_eq!(
            analysis.basic_issues,
            vec!["missing title", "missing meta description", "no H1 tags"]
        );
    }

    #[test]
    fn flags_multiple_h1() {
        let analysis = analyse("<title>t</title><h1>a</h1><h1>b</h1>");
        assert!(analysis
            .basic_issues
            .iter()
            .any(|i| i == "multiple H1 tags"));
    }

    #[test]
    fn idea_text_prefers_title_and_description() {
        let analysis = analyse(SAMPLE);
        assert_eq!(
            analysis.idea_text("https://example.com"),
            "Corner Bakery: Fresh bread daily"
        );

        let empty = PageAnalysis::default();
        assert_eq!(empty.idea_text("https://example.com"), "https://example.com");
    }
}
