//! Web retrieval via the DuckDuckGo Instant Answer API.
//!
//! The API requires no key and returns abstracts, instant answers,
//! definitions and related topics rather than full result listings. Each of
//! those becomes one [`RetrievalRecord`].

use async_trait::async_trait;
use research_application::{RetrievalError, RetrievalProvider};
use research_domain::RetrievalRecord;
use std::time::Duration;
use tracing::debug;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Retrieval provider backed by DuckDuckGo.
pub struct DuckDuckGoRetrieval {
    client: reqwest::Client,
    max_results: usize,
}

impl DuckDuckGoRetrieval {
    pub fn new(timeout: Duration, max_results: usize) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("DeepResearch/0.1")
            .build()
            .map_err(|e| RetrievalError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            max_results,
        })
    }
}

#[async_trait]
impl RetrievalProvider for DuckDuckGoRetrieval {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str) -> Result<Vec<RetrievalRecord>, RetrievalError> {
        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RetrievalError::Timeout
                } else {
                    RetrievalError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(RetrievalError::RequestFailed(format!(
                "Search API returned error: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RetrievalError::InvalidResponse(e.to_string()))?;

        let records = parse_instant_answer(&body, self.max_results);
        debug!("DuckDuckGo query '{}' returned {} records", query, records.len());
        Ok(records)
    }
}

fn non_empty<'a>(data: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    data[key].as_str().filter(|s| !s.is_empty())
}

/// Convert an Instant Answer response into records.
///
/// Order: abstract, instant answer, definition, then related topics
/// (including those nested in topic groups).
fn parse_instant_answer(data: &serde_json::Value, max_results: usize) -> Vec<RetrievalRecord> {
    let mut records = Vec::new();

    if let Some(text) = non_empty(data, "AbstractText") {
        let title = non_empty(data, "Heading")
            .or_else(|| non_empty(data, "AbstractSource"))
            .unwrap_or("Summary");
        records.push(RetrievalRecord::new(
            title,
            text,
            data["AbstractURL"].as_str().unwrap_or(""),
        ));
    }

    if let Some(answer) = non_empty(data, "Answer") {
        records.push(RetrievalRecord::new("Instant Answer", answer, ""));
    }

    if let Some(definition) = non_empty(data, "Definition") {
        records.push(RetrievalRecord::new(
            "Definition",
            definition,
            data["DefinitionURL"].as_str().unwrap_or(""),
        ));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        let flattened = topics.iter().flat_map(|topic| match topic["Topics"].as_array() {
            Some(group) => group.iter().collect::<Vec<_>>(),
            None => vec![topic],
        });
        for topic in flattened {
            if let Some(text) = non_empty(topic, "Text") {
                records.push(RetrievalRecord::new(
                    "",
                    text,
                    topic["FirstURL"].as_str().unwrap_or(""),
                ));
            }
        }
    }

    records.truncate(max_results);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_abstract_and_topics() {
        let data = json!({
            "Heading": "Humanoid robot",
            "AbstractText": "A humanoid robot is a robot resembling the human body.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Humanoid_robot",
            "Answer": "",
            "RelatedTopics": [
                { "Text": "Android - a humanoid robot", "FirstURL": "https://ddg/a" },
                { "Name": "Companies", "Topics": [
                    { "Text": "Figure AI", "FirstURL": "https://ddg/f" }
                ]}
            ]
        });
        let records = parse_instant_answer(&data, 10);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "Humanoid robot");
        assert_eq!(records[1].content, "Android - a humanoid robot");
        assert_eq!(records[2].url, "https://ddg/f");
    }

    #[test]
    fn test_parse_respects_max_results() {
        let data = json!({
            "Answer": "42",
            "Definition": "a number",
            "RelatedTopics": [{ "Text": "t", "FirstURL": "u" }]
        });
        let records = parse_instant_answer(&data, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Instant Answer");
        assert_eq!(records[1].title, "Definition");
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_instant_answer(&json!({}), 5).is_empty());
    }
}
