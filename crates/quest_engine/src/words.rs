use std::collections::VecDeque;

use quest_logging::quest_debug;

use crate::WordSourceError;

/// Ordered, append-only supply of search terms.
#[async_trait::async_trait]
pub trait WordSource: Send + Sync {
    fn words(&self) -> &[String];

    /// Grows the sequence until it holds at least `len` words.
    async fn ensure_length(&mut self, len: usize) -> Result<(), WordSourceError>;

    fn len(&self) -> usize {
        self.words().len()
    }

    fn is_empty(&self) -> bool {
        self.words().is_empty()
    }
}

/// In-memory word source that releases candidates from a pool on demand.
#[derive(Debug, Clone, Default)]
pub struct PoolWordSource {
    words: Vec<String>,
    pool: VecDeque<String>,
}

impl PoolWordSource {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: Vec::new(),
            pool: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of candidates not yet released into the sequence.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }
}

#[async_trait::async_trait]
impl WordSource for PoolWordSource {
    fn words(&self) -> &[String] {
        &self.words
    }

    async fn ensure_length(&mut self, len: usize) -> Result<(), WordSourceError> {
        while self.words.len() < len {
            match self.pool.pop_front() {
                Some(word) => self.words.push(word),
                None => {
                    return Err(WordSourceError::Exhausted {
                        requested: len,
                        available: self.words.len(),
                    })
                }
            }
        }
        quest_debug!(
            "word pool released up to {} words ({} left in pool)",
            self.words.len(),
            self.remaining()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn releases_words_in_order_and_never_shrinks() {
        let mut source = PoolWordSource::new(["a", "b", "c", "d"]);
        assert!(source.is_empty());

        source.ensure_length(2).await.unwrap();
        assert_eq!(source.words(), ["a", "b"]);

        source.ensure_length(1).await.unwrap();
        assert_eq!(source.len(), 2);

        source.ensure_length(4).await.unwrap();
        assert_eq!(source.words(), ["a", "b", "c", "d"]);
        assert_eq!(source.remaining(), 0);
    }

    #[tokio::test]
    async fn exhausted_pool_reports_shortfall() {
        let mut source = PoolWordSource::new(["a", "b"]);
        let err = source.ensure_length(5).await.unwrap_err();
        assert_eq!(
            err,
            WordSourceError::Exhausted {
                requested: 5,
                available: 2
            }
        );
        assert_eq!(source.len(), 2);
    }
}
