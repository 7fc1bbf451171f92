//! Wikipedia summaries through the MediaWiki action API.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::time::Duration;

/// Longest summary returned to the user, in characters.
pub const SUMMARY_MAX_CHARS: usize = 1000;

/// Options listed for an ambiguous term.
pub const DISAMBIGUATION_OPTIONS: usize = 5;

pub const NOT_FOUND_MESSAGE: &str = "Não foi possível encontrar informações sobre esse termo.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiOutcome {
    Summary(String),
    Ambiguous(Vec<String>),
    NotFound,
}

impl WikiOutcome {
    pub fn to_message(&self) -> String {
        match self {
            WikiOutcome::Summary(text) => text.clone(),
            WikiOutcome::Ambiguous(options) => format!(
                "Termo ambíguo. Opções: {}\nPor favor, seja mais específico.",
                options.join(", ")
            ),
            WikiOutcome::NotFound => NOT_FOUND_MESSAGE.to_string(),
        }
    }
}

/// Message shown when the lookup itself failed.
pub fn lookup_error_message(error: &anyhow::Error) -> String {
    format!("Ocorreu um erro ao buscar: {error}")
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, PartialEq, Eq)]
enum PageKind {
    Missing,
    Disambiguation(String),
    Article(String),
}

fn classify(page: &Page) -> PageKind {
    if page.missing || page.invalid {
        return PageKind::Missing;
    }

    if page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some())
    {
        return PageKind::Disambiguation(page.title.clone());
    }

    match page.extract.as_deref().map(str::trim) {
        Some(extract) if !extract.is_empty() => PageKind::Article(truncate_chars(extract, SUMMARY_MAX_CHARS)),
        _ => PageKind::Missing,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn first_page(response: QueryResponse) -> Option<Page> {
    response.query.and_then(|body| body.pages.into_iter().next())
}

#[derive(Clone)]
pub struct WikipediaClient {
    http: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    /// Client for the `lang` edition, e.g. `pt` for pt.wikipedia.org.
    pub fn new(lang: &str) -> Result<Self> {
        Self::with_api_url(format!("https://{lang}.wikipedia.org/w/api.php"))
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("assistente/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Looks `term` up by title, falling back to the best search hit when no
    /// page has that exact title.
    pub async fn lookup(&self, term: &str) -> Result<WikiOutcome> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(WikiOutcome::NotFound);
        }

        // `|` separates titles in the API and never appears in a page title,
        // so such terms only go through full-text search
        if !term.contains('|') {
            match self.fetch_page(term).await? {
                PageKind::Missing => {}
                kind => return self.resolve(kind).await,
            }
        }

        let Some(suggestion) = self.search(term).await? else {
            return Ok(WikiOutcome::NotFound);
        };
        tracing::debug!("Wikipedia: '{}' not found, trying '{}'", term, suggestion);

        match self.fetch_page(&suggestion).await? {
            PageKind::Missing => Ok(WikiOutcome::NotFound),
            kind => self.resolve(kind).await,
        }
    }

    async fn resolve(&self, kind: PageKind) -> Result<WikiOutcome> {
        match kind {
            PageKind::Missing => Ok(WikiOutcome::NotFound),
            PageKind::Article(summary) => Ok(WikiOutcome::Summary(summary)),
            PageKind::Disambiguation(title) => {
                let options = self.disambiguation_options(&title).await?;
                Ok(WikiOutcome::Ambiguous(options))
            }
        }
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<QueryResponse> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<QueryResponse>().await?)
    }

    async fn fetch_page(&self, title: &str) -> Result<PageKind> {
        let response = self
            .query(&[
                ("titles", title),
                ("redirects", "1"),
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
            ])
            .await?;

        Ok(first_page(response).map_or(PageKind::Missing, |page| classify(&page)))
    }

    async fn search(&self, term: &str) -> Result<Option<String>> {
        let response = self
            .query(&[("list", "search"), ("srsearch", term), ("srlimit", "1"), ("srprop", "")])
            .await?;

        Ok(response
            .query
            .and_then(|body| body.search.into_iter().next())
            .map(|hit| hit.title))
    }

    /// `prop=links` lists links alphabetically and includes every article
    /// link on the page, not only the listed meanings, so the options are an
    /// approximation of the page's own order.
    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>> {
        let limit = DISAMBIGUATION_OPTIONS.to_string();
        let response = self
            .query(&[
                ("titles", title),
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", limit.as_str()),
            ])
            .await?;

        let page = first_page(response)
            .ok_or_else(|| anyhow!("Disambiguation page '{}' disappeared", title))?;

        Ok(page
            .links
            .into_iter()
            .take(DISAMBIGUATION_OPTIONS)
            .map(|link| link.title)
            .collect())
    }
}
