// src/utils/url.rs

//! JupiterWeb endpoint construction.

use url::Url;

use crate::error::Result;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Builds the fixed request shapes served by JupiterWeb.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create endpoints rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so relative joins stay inside
    /// the base path.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// Unit listing page.
    pub fn units(&self) -> String {
        resolve_url(&self.base, "jupColegiadoLista?tipo=T")
    }

    /// Lecture listing page for one unit.
    pub fn unit_lectures(&self, unit_code: &str) -> String {
        resolve_url(
            &self.base,
            &format!("jupDisciplinaLista?letra=A-Z&tipo=T&codcg={unit_code}"),
        )
    }

    /// Classroom detail page for one subject.
    pub fn classrooms(&self, code: &str) -> String {
        resolve_url(&self.base, &format!("obterTurma?print=true&sgldis={code}"))
    }

    /// Lecture detail page for one subject.
    pub fn lecture(&self, code: &str) -> String {
        resolve_url(
            &self.base,
            &format!("obterDisciplina?print=true&sgldis={code}"),
        )
    }

    /// Course listing page for one unit.
    pub fn unit_courses(&self, unit_code: &str) -> String {
        resolve_url(
            &self.base,
            &format!("jupCursoLista?tipo=N&codcg={unit_code}"),
        )
    }

    /// Course detail page from a link captured on the course listing.
    pub fn course(&self, link: &str) -> String {
        resolve_url(&self.base, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://uspdigital.usp.br/jupiterweb/";

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_request_shapes() {
        let endpoints = Endpoints::new(BASE).unwrap();
        assert_eq!(
            endpoints.units(),
            "https://uspdigital.usp.br/jupiterweb/jupColegiadoLista?tipo=T"
        );
        assert_eq!(
            endpoints.unit_lectures("45"),
            "https://uspdigital.usp.br/jupiterweb/jupDisciplinaLista?letra=A-Z&tipo=T&codcg=45"
        );
        assert_eq!(
            endpoints.classrooms("MAC0110"),
            "https://uspdigital.usp.br/jupiterweb/obterTurma?print=true&sgldis=MAC0110"
        );
        assert_eq!(
            endpoints.lecture("MAC0110"),
            "https://uspdigital.usp.br/jupiterweb/obterDisciplina?print=true&sgldis=MAC0110"
        );
        assert_eq!(
            endpoints.unit_courses("45"),
            "https://uspdigital.usp.br/jupiterweb/jupCursoLista?tipo=N&codcg=45"
        );
    }

    #[test]
    fn test_course_link_is_relative_to_base() {
        let endpoints = Endpoints::new("https://uspdigital.usp.br/jupiterweb").unwrap();
        assert_eq!(
            endpoints.course("listarGradeCurricular?codcg=45&codcur=45052&codhab=1&tipo=N"),
            "https://uspdigital.usp.br/jupiterweb/listarGradeCurricular?codcg=45&codcur=45052&codhab=1&tipo=N"
        );
    }

    #[test]
    fn test_invalid_base() {
        assert!(Endpoints::new("not a url").is_err());
    }
}
