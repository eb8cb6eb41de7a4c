use std::collections::HashMap;

use serde::Serialize;

use crate::message::RawMessage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorSentiment {
    pub author: String,
    pub message_count: usize,
    pub average_sentiment: f64,
}

/// Per-author message counts and mean sentiment, in order of each author's
/// first message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub authors: Vec<AuthorSentiment>,
}

impl SentimentSummary {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn total_messages(&self) -> usize {
        self.authors.iter().map(|a| a.message_count).sum()
    }

    pub fn get(&self, author: &str) -> Option<&AuthorSentiment> {
        self.authors.iter().find(|a| a.author == author)
    }
}

impl From<Vec<AuthorSentiment>> for SentimentSummary {
    fn from(authors: Vec<AuthorSentiment>) -> Self {
        Self { authors }
    }
}

/// Groups `records` by author and averages their sentiment. Missing authors
/// count as "Unknown" and missing sentiment as 0.
pub fn summarize<'a>(records: impl IntoIterator<Item = &'a RawMessage>) -> SentimentSummary {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, usize, f64)> = Vec::new();

    for record in records {
        let author = record.author_or_default();
        let slot = *index.entry(author).or_insert_with(|| {
            totals.push((author, 0, 0.0));
            totals.len() - 1
        });
        let entry = &mut totals[slot];
        entry.1 += 1;
        entry.2 += record.sentiment_or_default();
    }

    let authors = totals
        .into_iter()
        .map(|(author, count, sum)| AuthorSentiment {
            author: author.to_string(),
            message_count: count,
            average_sentiment: sum / count as f64,
        })
        .collect();

    SentimentSummary { authors }
}
