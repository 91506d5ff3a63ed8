//! RPPS site registry
//!
//! A [`Site`] names one pension fund, its state code and the root URL the
//! discovery step starts from. The built-in list is static; the pipeline
//! never mutates it.

use std::path::{Path, PathBuf};

/// One RPPS website to collect from
#[derive(Debug, Clone)]
pub struct Site {
    /// Display name of the pension fund
    pub name: String,

    /// Two-letter state code (UF)
    pub uf: String,

    /// Root URL discovery starts from
    pub url: String,
}

impl Site {
    pub fn new(name: &str, uf: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            uf: uf.to_string(),
            url: url.to_string(),
        }
    }

    /// Directory this site's downloads land in: `<base>/<UF>/<safe name>`.
    ///
    /// Spaces and slashes in the site name become underscores so the name is
    /// usable as a single path component.
    pub fn data_dir(&self, base: &Path) -> PathBuf {
        let safe_name = self.name.replace(' ', "_").replace('/', "_");
        base.join(&self.uf).join(safe_name)
    }
}

/// The built-in site list. Umuarama is an extra site kept to exercise the
/// pipeline against a layout none of the others share.
pub fn default_sites() -> Vec<Site> {
    vec![
        Site::new("IPMO Osasco", "SP", "https://www.ipmosasco.com.br/"),
        Site::new(
            "IPSMI Itaquaquecetuba",
            "SP",
            "https://ipsmi.itaquaquecetuba.sp.gov.br/",
        ),
        Site::new(
            "FUPREVAS Vassouras",
            "RJ",
            "https://www.vassouras.rj.gov.br/category/fuprevas/",
        ),
        Site::new("ToledoPrev", "PR", "https://toledoprev.toledo.pr.gov.br/"),
        Site::new(
            "FPGPREV Praia Grande",
            "SP",
            "https://www2.praiagrande.sp.gov.br/",
        ),
        Site::new("FPMU Umuarama", "PR", "https://fpmu.umuarama.pr.gov.br/"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_sanitizes_name() {
        let site = Site::new("FPGPREV Praia Grande", "SP", "https://example.com/");
        let dir = site.data_dir(Path::new("./data"));
        assert_eq!(dir, PathBuf::from("./data/SP/FPGPREV_Praia_Grande"));
    }

    #[test]
    fn data_dir_replaces_slashes() {
        let site = Site::new("A/B Fund", "RJ", "https://example.com/");
        let dir = site.data_dir(Path::new("/out"));
        assert_eq!(dir, PathBuf::from("/out/RJ/A_B_Fund"));
    }

    #[test]
    fn default_sites_are_well_formed() {
        let sites = default_sites();
        assert_eq!(sites.len(), 6);
        for site in sites {
            assert!(site.url.starts_with("http"));
            assert_eq!(site.uf.len(), 2);
        }
    }
}
