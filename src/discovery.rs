//! Candidate-page discovery
//!
//! Given a site's root page (rendered, so script-built menus are visible),
//! discovery scans every anchor and keeps the ones whose href or visible
//! text suggests meeting minutes live behind them. The blacklist is applied
//! before the keyword check and always wins. Relative hrefs are resolved
//! against the site root; results are de-duplicated in first-seen order.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::error::Result;
use crate::fetch::RenderHtml;
use crate::rules::LinkRules;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// An anchor's href and visible text, as seen in the page
#[derive(Debug, Clone)]
pub(crate) struct Anchor {
    pub href: String,
    pub text: String,
}

/// Collect every `<a href>` in the document.
pub(crate) fn anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            let text = element.text().collect::<String>();
            Some(Anchor { href, text })
        })
        .collect()
}

/// Resolve `href` against `base` unless it is already absolute.
pub(crate) fn absolutize(base: &Url, href: &str) -> Option<String> {
    if href.starts_with("http") {
        Some(href.to_string())
    } else {
        base.join(href).ok().map(String::from)
    }
}

/// Find candidate meeting pages on a site's root page.
///
/// Fetch failures surface as `Err`; the caller logs and skips the site. An
/// empty result means the same thing one level up.
pub async fn find_meeting_links<R: RenderHtml>(
    renderer: &R,
    base_url: &str,
    rules: &LinkRules,
) -> Result<Vec<String>> {
    let base = Url::parse(base_url)?;
    let html = renderer.rendered_html(base_url).await?;
    let links = select_meeting_links(&html, &base, rules);
    info!(url = base_url, candidates = links.len(), "discovery done");
    Ok(links)
}

/// Pure anchor-filtering core of discovery, separated for testing.
pub fn select_meeting_links(html: &str, base: &Url, rules: &LinkRules) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors(html) {
        // Blacklist wins over any keyword match
        if rules.is_blacklisted(&anchor.href) || rules.is_blacklisted(&anchor.text) {
            debug!(href = %anchor.href, "dropped blacklisted link");
            continue;
        }
        if rules.matches_keyword(&anchor.href) || rules.matches_keyword(&anchor.text) {
            if let Some(absolute) = absolutize(base, &anchor.href) {
                if seen.insert(absolute.clone()) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;

    struct FakeRenderer {
        html: String,
    }

    impl RenderHtml for FakeRenderer {
        async fn rendered_html(&self, _url: &str) -> std::result::Result<String, FetchError> {
            Ok(self.html.clone())
        }
    }

    struct FailingRenderer;

    impl RenderHtml for FailingRenderer {
        async fn rendered_html(&self, url: &str) -> std::result::Result<String, FetchError> {
            Err(FetchError::Render(format!("boom: {url}")))
        }
    }

    fn base() -> Url {
        Url::parse("https://rpps.example.gov.br/").unwrap()
    }

    #[test]
    fn keeps_keyword_links_and_resolves_relative_hrefs() {
        let html = r#"
            <a href="/atas/2024">Atas 2024</a>
            <a href="https://outro.example.com/conselho">Conselho</a>
            <a href="/licitacoes">Licitações</a>
        "#;
        let links = select_meeting_links(html, &base(), &LinkRules::default());
        assert_eq!(
            links,
            vec![
                "https://rpps.example.gov.br/atas/2024".to_string(),
                "https://outro.example.com/conselho".to_string(),
            ]
        );
    }

    #[test]
    fn blacklist_wins_over_keywords() {
        // "investimentos" is a keyword, but the full phrase is blacklisted
        let html = r#"
            <a href="/docs/politica-de-investimentos.pdf">Política de Investimentos</a>
            <a href="/atas">Atas da Reunião</a>
        "#;
        let links = select_meeting_links(html, &base(), &LinkRules::default());
        assert_eq!(links, vec!["https://rpps.example.gov.br/atas".to_string()]);
    }

    #[test]
    fn blacklisted_text_drops_anchor_even_with_clean_href() {
        let html = r#"<a href="/arquivos/doc1.pdf">Policy de investimento</a>"#;
        let links = select_meeting_links(html, &base(), &LinkRules::default());
        assert!(links.is_empty());
    }

    #[test]
    fn deduplicates_preserving_first_seen_order() {
        let html = r#"
            <a href="/conselho">Conselho</a>
            <a href="/atas">Atas</a>
            <a href="/conselho">Conselho (rodapé)</a>
        "#;
        let links = select_meeting_links(html, &base(), &LinkRules::default());
        assert_eq!(
            links,
            vec![
                "https://rpps.example.gov.br/conselho".to_string(),
                "https://rpps.example.gov.br/atas".to_string(),
            ]
        );
    }

    #[test]
    fn keyword_match_on_text_alone_is_enough() {
        let html = r#"<a href="/p?id=42">Publicações</a>"#;
        let links = select_meeting_links(html, &base(), &LinkRules::default());
        assert_eq!(links, vec!["https://rpps.example.gov.br/p?id=42".to_string()]);
    }

    #[tokio::test]
    async fn uses_the_renderer() {
        let renderer = FakeRenderer {
            html: r#"<a href="/atas">Atas</a>"#.to_string(),
        };
        let links = find_meeting_links(
            &renderer,
            "https://rpps.example.gov.br/",
            &LinkRules::default(),
        )
        .await
        .unwrap();
        assert_eq!(links, vec!["https://rpps.example.gov.br/atas".to_string()]);
    }

    #[tokio::test]
    async fn render_failure_surfaces_as_error() {
        let result = find_meeting_links(
            &FailingRenderer,
            "https://rpps.example.gov.br/",
            &LinkRules::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
