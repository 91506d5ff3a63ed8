//! Link relevance rules
//!
//! Discovery and the downloader both decide whether an anchor matters by
//! matching its href and visible text against these rules. The blacklist is
//! checked first and always wins: a link mentioning an investment *policy*
//! is dropped even though it matches the "investimento" keyword.
//!
//! The rules are plain data passed into each component, so tests can swap
//! them wholesale instead of patching process-wide state.

/// Keyword, blacklist and extension rules shared by discovery and download.
#[derive(Debug, Clone)]
pub struct LinkRules {
    /// Case-insensitive substrings that mark a link as relevant
    pub keywords: Vec<String>,

    /// Case-insensitive substrings that disqualify a link outright
    pub blacklist: Vec<String>,

    /// Path suffixes accepted as direct document links
    pub document_extensions: Vec<String>,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            keywords: [
                "ata",
                "reunião",
                "comitê",
                "comite",
                "investimento",
                "conselho",
                "transparência",
                "publicações",
                "documentos",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blacklist: [
                "política de investimentos",
                "politica de investimentos",
                "policy",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            document_extensions: [".pdf", ".doc", ".docx", ".htm", ".html"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl LinkRules {
    /// True when the href or text carries any blacklisted phrase.
    ///
    /// Hrefs hyphenate or underscore multi-word phrases, so `-` and `_`
    /// count as spaces when matching.
    pub fn is_blacklisted(&self, s: &str) -> bool {
        let s = s.to_lowercase().replace(['-', '_'], " ");
        self.blacklist.iter().any(|b| s.contains(b.as_str()))
    }

    /// True when the href or text carries any relevance keyword.
    pub fn matches_keyword(&self, s: &str) -> bool {
        let s = s.to_lowercase();
        self.keywords.iter().any(|k| s.contains(k.as_str()))
    }

    /// True when the href's path ends in an accepted document extension.
    pub fn is_document_link(&self, href: &str) -> bool {
        if href.is_empty() {
            return false;
        }
        let href = href.to_lowercase();
        self.document_extensions
            .iter()
            .any(|ext| href.ends_with(ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blacklist_matches_are_case_insensitive() {
        let rules = LinkRules::default();
        assert!(rules.is_blacklisted("Política de Investimentos 2024"));
        assert!(rules.is_blacklisted("/docs/POLICY.pdf"));
        assert!(!rules.is_blacklisted("ata da reunião"));
    }

    #[test]
    fn blacklist_sees_through_hyphenated_hrefs() {
        let rules = LinkRules::default();
        assert!(rules.is_blacklisted("politica-de-investimentos.pdf"));
        assert!(rules.is_blacklisted("politica_de_investimentos_2023.pdf"));
    }

    #[test]
    fn keyword_matches_are_substrings() {
        let rules = LinkRules::default();
        assert!(rules.matches_keyword("Atas do Conselho"));
        assert!(rules.matches_keyword("/transparência/2023"));
        assert!(!rules.matches_keyword("licitações"));
    }

    #[test]
    fn document_extensions_ignore_case() {
        let rules = LinkRules::default();
        assert!(rules.is_document_link("/files/ata.PDF"));
        assert!(rules.is_document_link("relatorio.docx"));
        assert!(rules.is_document_link("pagina.htm"));
        assert!(!rules.is_document_link("/files/ata.xlsx"));
        assert!(!rules.is_document_link(""));
    }
}
