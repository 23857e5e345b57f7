//! Result-block extraction from a saved results page.
//!
//! Each DOM shape the page can use is a [`ResultShape`]: it knows how to find
//! its blocks and how to turn one block into a [`SearchResult`]. The
//! [`ResultExtractor`] runs its shapes in order and concatenates their output,
//! so organic listings always precede card entries.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::domain::extract_domain;
use crate::error::{Result, SerpError};
use crate::time::guess_time;
use crate::types::SearchResult;

/// CSS selectors for both result shapes. Defaults target Bing's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSet {
    pub organic_block: String,
    pub organic_anchor: String,
    /// Preferred snippet paragraph.
    pub caption: String,
    /// Any-paragraph fallback for the snippet.
    pub paragraph: String,
    pub citation: String,
    /// Tried in order; first hit is the attribution line.
    pub attribution: Vec<String>,
    pub card_block: String,
    pub card_anchor: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            organic_block: "#b_results li.b_algo".into(),
            organic_anchor: "h2 a".into(),
            caption: ".b_caption p".into(),
            paragraph: "p".into(),
            citation: "cite".into(),
            attribution: vec![".b_attribution".into(), ".b_tpcn".into()],
            card_block: ".news-card, .news-card__item, .b_pressItem".into(),
            card_anchor: "a".into(),
        }
    }
}

/// One way a result can be laid out in the page.
pub trait ResultShape {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Selector matching every block of this shape.
    fn block_selector(&self) -> &Selector;

    /// Build a record from one block, or `None` when the block lacks the
    /// anchor the shape needs.
    fn extract(&self, block: ElementRef<'_>, now: NaiveDateTime) -> Option<SearchResult>;
}

/// Standard list-item listing with a heading link.
pub struct OrganicResult {
    block: Selector,
    anchor: Selector,
    caption: Selector,
    paragraph: Selector,
    citation: Selector,
    attribution: Vec<Selector>,
}

impl OrganicResult {
    pub fn new(selectors: &SelectorSet) -> Result<Self> {
        Ok(Self {
            block: compile("organic_block", &selectors.organic_block)?,
            anchor: compile("organic_anchor", &selectors.organic_anchor)?,
            caption: compile("caption", &selectors.caption)?,
            paragraph: compile("paragraph", &selectors.paragraph)?,
            citation: compile("citation", &selectors.citation)?,
            attribution: selectors
                .attribution
                .iter()
                .map(|css| compile("attribution", css))
                .collect::<Result<_>>()?,
        })
    }
}

impl ResultShape for OrganicResult {
    fn name(&self) -> &'static str {
        "organic"
    }

    fn block_selector(&self) -> &Selector {
        &self.block
    }

    fn extract(&self, block: ElementRef<'_>, now: NaiveDateTime) -> Option<SearchResult> {
        let anchor = block.select(&self.anchor).next()?;

        let snippet = first_text(block, [&self.caption, &self.paragraph]);
        let display_url = first_text(block, [&self.citation]);
        let attribution = first_text(block, self.attribution.iter());

        // Bylines usually carry the date, so they lead.
        let time_text = format!("{attribution} {snippet}");
        let guessed_time = guess_time(&time_text, now);

        Some(record(anchor, display_url, snippet, attribution, guessed_time))
    }
}

/// News-style card: any link inside, date somewhere in the card text.
pub struct NewsCard {
    block: Selector,
    anchor: Selector,
}

impl NewsCard {
    pub fn new(selectors: &SelectorSet) -> Result<Self> {
        Ok(Self {
            block: compile("card_block", &selectors.card_block)?,
            anchor: compile("card_anchor", &selectors.card_anchor)?,
        })
    }
}

impl ResultShape for NewsCard {
    fn name(&self) -> &'static str {
        "card"
    }

    fn block_selector(&self) -> &Selector {
        &self.block
    }

    fn extract(&self, block: ElementRef<'_>, now: NaiveDateTime) -> Option<SearchResult> {
        let anchor = block.select(&self.anchor).next()?;
        let guessed_time = guess_time(&joined_text(block), now);
        Some(record(
            anchor,
            String::new(),
            String::new(),
            String::new(),
            guessed_time,
        ))
    }
}

/// Runs a fixed list of shapes over a document.
pub struct ResultExtractor {
    shapes: Vec<Box<dyn ResultShape>>,
}

impl ResultExtractor {
    /// Organic listings followed by news cards, using `selectors`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sift_serp::{ResultExtractor, SelectorSet};
    ///
    /// let html = r#"<ol id="b_results"><li class="b_algo">
    ///   <h2><a href="https://example.com/a">Example</a></h2>
    ///   <div class="b_caption"><p>Jan 5, 2024 · An example page</p></div>
    /// </li></ol>"#;
    /// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    ///
    /// let extractor = ResultExtractor::new(&SelectorSet::default()).unwrap();
    /// let results = extractor.extract(html, now);
    /// assert_eq!(results.len(), 1);
    /// assert_eq!(results[0].domain, "example.com");
    /// assert!(results[0].guessed_time.is_some());
    /// ```
    pub fn new(selectors: &SelectorSet) -> Result<Self> {
        Ok(Self::with_shapes(vec![
            Box::new(OrganicResult::new(selectors)?),
            Box::new(NewsCard::new(selectors)?),
        ]))
    }

    pub fn with_shapes(shapes: Vec<Box<dyn ResultShape>>) -> Self {
        Self { shapes }
    }

    /// Parse `html` and extract every result. `now` anchors relative times
    /// for the whole run.
    pub fn extract(&self, html: &str, now: NaiveDateTime) -> Vec<SearchResult> {
        let document = Html::parse_document(html);
        self.extract_document(&document, now)
    }

    pub fn extract_document(&self, document: &Html, now: NaiveDateTime) -> Vec<SearchResult> {
        let mut out = Vec::new();
        for shape in &self.shapes {
            let mut seen = 0usize;
            let before = out.len();
            for block in document.select(shape.block_selector()) {
                seen += 1;
                out.extend(shape.extract(block, now));
            }
            tracing::debug!(
                shape = shape.name(),
                blocks = seen,
                extracted = out.len() - before,
                skipped = seen - (out.len() - before),
                "extracted result blocks"
            );
        }
        out
    }
}

fn compile(field: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SerpError::Selector {
        field,
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn record(
    anchor: ElementRef<'_>,
    display_url: String,
    snippet: String,
    attribution: String,
    guessed_time: Option<NaiveDateTime>,
) -> SearchResult {
    let url = anchor.value().attr("href").unwrap_or("").trim().to_string();
    SearchResult {
        title: joined_text(anchor),
        domain: extract_domain(&url),
        url,
        display_url,
        snippet,
        attribution,
        guessed_time,
    }
}

/// Text of the first element matched by any of `selectors`, tried in order.
fn first_text<'s>(block: ElementRef<'_>, selectors: impl IntoIterator<Item = &'s Selector>) -> String {
    selectors
        .into_iter()
        .find_map(|sel| block.select(sel).next())
        .map(joined_text)
        .unwrap_or_default()
}

/// Trimmed, non-empty text nodes joined by single spaces.
fn joined_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
