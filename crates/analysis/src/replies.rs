//! Attribution of "answered a question" credit along the reply graph.

use crate::question::QuestionDetector;
use crate::resolver::{non_empty, resolve_all};
use chatstat_core::{Message, Transcript};
use std::collections::HashMap;
use tracing::{debug, info};

/// Question flag per message id. Ids never indexed read as not-a-question.
#[derive(Debug, Clone, Default)]
pub struct QuestionFlagIndex {
    flags: HashMap<i64, bool>,
}

impl QuestionFlagIndex {
    /// Flag every message that has both an id and a non-empty body.
    pub fn build(messages: &[Message], detector: &QuestionDetector<'_>) -> Self {
        let resolved = resolve_all(messages);
        let mut flags = HashMap::new();

        for entry in non_empty(messages, &resolved) {
            let Some(id) = entry.message.id else {
                continue;
            };
            flags.insert(id, detector.is_question(entry.text));
        }

        Self { flags }
    }

    /// Whether the message with `id` was flagged as a question.
    pub fn is_question(&self, id: i64) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    /// Number of indexed messages.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of indexed messages flagged as questions.
    pub fn question_count(&self) -> usize {
        self.flags.values().filter(|flag| **flag).count()
    }
}

/// Per-author reply counts, kept in first-vote order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserReplyTally {
    counts: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl UserReplyTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one vote for `author`.
    pub fn record(&mut self, author: &str) {
        match self.positions.get(author) {
            Some(&position) => self.counts[position].1 += 1,
            None => {
                self.positions.insert(author.to_string(), self.counts.len());
                self.counts.push((author.to_string(), 1));
            }
        }
    }

    /// Votes recorded for `author`.
    pub fn count(&self, author: &str) -> usize {
        self.positions
            .get(author)
            .map(|&position| self.counts[position].1)
            .unwrap_or(0)
    }

    /// Number of distinct authors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no vote was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All authors with their counts, in first-vote order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.counts
    }

    /// The `n` authors with the most votes, descending. Equal counts keep
    /// first-vote order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        if n == 0 {
            return Vec::new();
        }
        let mut ranked = self.counts.clone();
        // stable sort: ties stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Credits authors whose messages reply to question messages.
pub struct ReplyAttributionEngine<'a> {
    detector: QuestionDetector<'a>,
}

impl<'a> ReplyAttributionEngine<'a> {
    /// Create an engine using `detector` to flag questions.
    pub fn new(detector: QuestionDetector<'a>) -> Self {
        Self { detector }
    }

    /// Tally one vote per reply whose target is a question.
    ///
    /// Replies to unknown or unindexed ids, and replies without an author,
    /// are skipped without error.
    pub fn compute_tally(&self, transcript: &Transcript) -> UserReplyTally {
        let index = QuestionFlagIndex::build(&transcript.messages, &self.detector);
        info!(
            "indexed {} messages, {} questions",
            index.len(),
            index.question_count()
        );

        let mut tally = UserReplyTally::new();
        for message in &transcript.messages {
            let Some(target) = message.reply_to_id else {
                continue;
            };
            if !index.is_question(target) {
                continue;
            }
            match message.author.as_deref() {
                Some(author) => tally.record(author),
                None => debug!(
                    "reply {:?} to question {} has no author, skipping",
                    message.id, target
                ),
            }
        }
        tally
    }

    /// The `top_n` authors who most often replied to questions.
    pub fn compute_top_repliers(&self, transcript: &Transcript, top_n: usize) -> Vec<(String, usize)> {
        if top_n == 0 {
            return Vec::new();
        }
        self.compute_tally(transcript).top(top_n)
    }
}
