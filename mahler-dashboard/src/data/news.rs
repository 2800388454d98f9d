//! Headline extraction from a news listing page.

use scraper::{Html, Selector};
use thiserror::Error;

use super::types::Headline;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Headline fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Invalid headline selector: {0}")]
    InvalidSelector(String),
}

/// Text of every node matching `selector`, in document order.
pub fn extract_headlines(html: &str, selector: &str) -> Result<Vec<Headline>, NewsError> {
    let selector = Selector::parse(selector)
        .map_err(|e| NewsError::InvalidSelector(format!("{}: {:?}", selector, e)))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .map(Headline::new)
        .collect())
}

/// Keep headlines containing at least one keyword, preserving order.
pub fn filter_headlines(headlines: Vec<Headline>, keywords: &[String]) -> Vec<Headline> {
    headlines
        .into_iter()
        .filter(|h| h.matches_any(keywords))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h3>Powell signals patience on rate cuts</h3>
          <div><h3>  Oil slips as <b>OPEC</b> output rises </h3></div>
          <h3>CPI cools for a third month</h3>
          <h2>Fed minutes due Wednesday</h2>
          <h3></h3>
          <h3>Powell signals patience on rate cuts</h3>
        </body></html>
    "#;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_extract_h3_text_in_order() {
        let headlines = extract_headlines(PAGE, "h3").unwrap();
        let texts: Vec<_> = headlines.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Powell signals patience on rate cuts",
                "Oil slips as OPEC output rises",
                "CPI cools for a third month",
                "Powell signals patience on rate cuts",
            ]
        );
    }

    #[test]
    fn test_filter_keeps_duplicates_and_order() {
        let headlines = extract_headlines(PAGE, "h3").unwrap();
        let kept = filter_headlines(headlines, &keywords(&["Powell", "CPI"]));
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].text, "Powell signals patience on rate cuts");
        assert_eq!(kept[1].text, "CPI cools for a third month");
        assert_eq!(kept[2], kept[0]);
    }

    #[test]
    fn test_filter_is_subsequence_of_input() {
        let headlines = extract_headlines(PAGE, "h3").unwrap();
        let words = keywords(&["OPEC", "Fed"]);
        let kept = filter_headlines(headlines.clone(), &words);

        let mut remaining = headlines.iter();
        for h in &kept {
            assert!(h.matches_any(&words));
            assert!(remaining.any(|orig| orig == h));
        }
    }

    #[test]
    fn test_empty_keywords_yield_nothing() {
        let headlines = extract_headlines(PAGE, "h3").unwrap();
        assert!(filter_headlines(headlines, &[]).is_empty());
    }

    #[test]
    fn test_empty_string_keyword_keeps_everything() {
        let headlines = extract_headlines(PAGE, "h3").unwrap();
        let total = headlines.len();
        assert_eq!(filter_headlines(headlines, &keywords(&[""])).len(), total);
    }

    #[test]
    fn test_invalid_selector() {
        let err = extract_headlines(PAGE, "h3[").unwrap_err();
        assert!(matches!(err, NewsError::InvalidSelector(_)));
    }
}
