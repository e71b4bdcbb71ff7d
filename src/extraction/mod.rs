//! Selector-driven record extraction
//!
//! Pure function shared by both strategies: markup in, ordered records out.
//! Only the markup source differs between the static and dynamic paths.

mod record;

pub use record::ScrapedRecord;

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::selectors::SelectorMap;

/// Extract records from `markup` using `selectors`.
///
/// 1. Scopes are the elements matched by the container selector, or the
///    document root element when the map has no container.
/// 2. When the container matches nothing, the whole document is the single
///    scope.
/// 3. Each scope yields one record holding, for every data field, the trimmed
///    text of the first matching descendant, or `None`.
///
/// A map without data fields yields no records. Records follow the document
/// order of their scopes; fields follow the selector map's order.
pub fn extract(markup: &str, selectors: &SelectorMap) -> Result<Vec<ScrapedRecord>, ScrapeError> {
    if !selectors.has_fields() {
        return Ok(Vec::new());
    }

    let compiled = CompiledSelectors::compile(selectors)?;
    let document = Html::parse_document(markup);

    let scopes: Vec<ElementRef<'_>> = match &compiled.container {
        Some(container) => document.select(container).collect(),
        None => vec![document.root_element()],
    };

    if scopes.is_empty() {
        tracing::debug!("Container matched no elements, extracting from whole document");
        return Ok(vec![compiled.build_record(|selector| {
            first_text(document.select(selector))
        })]);
    }

    Ok(scopes
        .iter()
        .map(|scope| compiled.build_record(|selector| first_text(scope.select(selector))))
        .collect())
}

/// Selectors parsed once per extraction
struct CompiledSelectors {
    container: Option<Selector>,
    fields: Vec<(String, Selector)>,
}

impl CompiledSelectors {
    fn compile(selectors: &SelectorMap) -> Result<Self, ScrapeError> {
        let container = selectors
            .container()
            .map(|raw| parse_selector("container", raw))
            .transpose()?;

        let fields = selectors
            .fields()
            .map(|(name, raw)| parse_selector(name, raw).map(|sel| (name.to_string(), sel)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { container, fields })
    }

    fn build_record<F>(&self, mut resolve: F) -> ScrapedRecord
    where
        F: FnMut(&Selector) -> Option<String>,
    {
        let mut record = ScrapedRecord::with_capacity(self.fields.len());
        for (name, selector) in &self.fields {
            record.push(name, resolve(selector));
        }
        record
    }
}

fn parse_selector(name: &str, raw: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(raw).map_err(|e| {
        ScrapeError::Extraction(format!("Invalid selector '{raw}' for '{name}': {e}"))
    })
}

fn first_text<'a>(mut matches: impl Iterator<Item = ElementRef<'a>>) -> Option<String> {
    matches
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_search_is_scoped_to_container() {
        let html = r#"
            <h2>outside</h2>
            <div class="card"><span class="name">inside</span></div>
        "#;
        let selectors = SelectorMap::from_pairs([("container", ".card"), ("title", "h2")]);

        let records = extract(html, &selectors).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("title"), Some(None));
    }

    #[test]
    fn invalid_field_selector_is_extraction_error() {
        let selectors = SelectorMap::from_pairs([("title", "h2[")]);
        let err = extract("<h2>x</h2>", &selectors).unwrap_err();
        assert!(matches!(err, ScrapeError::Extraction(_)));
    }

    #[test]
    fn default_scope_sees_head_elements() {
        let html = "<html><head><title> Page </title></head><body></body></html>";
        let selectors = SelectorMap::from_pairs([("page_title", "title")]);

        let records = extract(html, &selectors).unwrap();
        assert_eq!(records[0].value("page_title"), Some("Page"));
    }
}
