//! Fixed-size overlapping text chunking

use crate::config::{ChunkingConfig, SPLIT_STRATEGY};
use crate::error::{Error, Result};
use crate::types::Chunk;

use super::normalize::normalize_whitespace;

/// Splits text into fixed-size windows that overlap by a fixed amount.
///
/// Windows start every `chunk_size - overlap` characters. Each window is
/// trimmed and dropped if nothing is left, but the next window still starts
/// one step further on. Sizes are counted in `char`s, so a window never ends
/// inside a multibyte character.
///
/// The number of windows is `ceil(len / step)` with no upper bound: a small
/// step over a large document produces a proportionally large number of
/// chunks (and embedding requests).
#[derive(Debug, Clone)]
pub struct FixedOverlapChunker {
    /// Window size in characters
    chunk_size: usize,
    /// Characters shared by consecutive windows
    overlap: usize,
    /// Label persisted with each row
    strategy: String,
}

impl FixedOverlapChunker {
    /// Create a chunker; `overlap` must be smaller than `chunk_size`
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if overlap >= chunk_size {
            return Err(Error::InvalidConfiguration {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
            strategy: SPLIT_STRATEGY.to_string(),
        })
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        let mut chunker = Self::new(config.chunk_size, config.chunk_overlap)?;
        chunker.strategy = config.strategy.clone();
        Ok(chunker)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between consecutive window starts
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Normalize `text` and cut it into windows
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return Vec::new();
        }

        // Byte position of every char boundary, including the end.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = bounds.len() - 1;
        let step = self.step();

        let mut chunks = Vec::with_capacity(len.div_ceil(step));
        for start in (0..len).step_by(step) {
            let end = start.saturating_add(self.chunk_size).min(len);
            let window = text[bounds[start]..bounds[end]].trim();
            if window.is_empty() {
                continue;
            }
            chunks.push(Chunk::new(chunks.len(), start, window.to_string()));
        }

        tracing::debug!(
            chars = len,
            chunks = chunks.len(),
            size = self.chunk_size,
            overlap = self.overlap,
            "Chunked text"
        );

        chunks
    }

    /// Chunk and keep only the texts
    pub fn chunk_texts(&self, text: &str) -> Vec<String> {
        self.chunk(text).into_iter().map(|c| c.text).collect()
    }
}

/// Split `text` into overlapping windows of `chunk_size` characters.
///
/// Fails with `InvalidConfiguration` when `overlap >= chunk_size`, before
/// looking at the text.
pub fn split_fixed_overlap(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    Ok(FixedOverlapChunker::new(chunk_size, overlap)?.chunk_texts(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_window_walk() {
        let chunks = split_fixed_overlap("abcdefghij", 4, 1).unwrap();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij", "j"]);

        let offsets: Vec<usize> = FixedOverlapChunker::new(4, 1)
            .unwrap()
            .chunk("abcdefghij")
            .iter()
            .map(|c| c.offset)
            .collect();
        assert_eq!(offsets, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_default_parameters_on_1500_chars() {
        let text = "x".repeat(1500);
        let chunks = split_fixed_overlap(&text, 1000, 200).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 700);
    }

    #[test]
    fn test_overlap_equal_to_size_is_rejected() {
        let err = split_fixed_overlap("anything", 200, 200).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration {
                chunk_size: 200,
                overlap: 200
            }
        ));
    }

    #[test]
    fn test_invalid_configuration_checked_before_text() {
        assert!(matches!(
            split_fixed_overlap("", 0, 0),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_and_whitespace_text() {
        assert!(split_fixed_overlap("", 10, 2).unwrap().is_empty());
        assert!(split_fixed_overlap(" \n\t  ", 10, 2).unwrap().is_empty());
    }

    #[test]
    fn test_input_is_normalized_first() {
        let chunks = split_fixed_overlap("  one\n\ntwo\tthree  ", 100, 10).unwrap();
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn test_whitespace_window_dropped_but_step_kept() {
        let chunker = FixedOverlapChunker::new(1, 0).unwrap();
        let chunks = chunker.chunk("ab cd");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        let offsets: Vec<usize> = chunks.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 4]);
        let indexes: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_windows_are_trimmed() {
        let chunks = split_fixed_overlap("ab cd ef", 3, 0).unwrap();
        assert_eq!(chunks, vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_multibyte_text_is_split_on_chars() {
        let chunks = split_fixed_overlap("ñandú über café", 4, 1).unwrap();
        assert_eq!(chunks[0], "ñand");
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
    }

    #[test]
    fn test_from_config_keeps_strategy_label() {
        let config = ChunkingConfig {
            chunk_size: 50,
            chunk_overlap: 5,
            strategy: "custom".to_string(),
        };
        let chunker = FixedOverlapChunker::from_config(&config).unwrap();
        assert_eq!(chunker.step(), 45);
        assert_eq!(chunker.strategy(), "custom");

        let default = FixedOverlapChunker::from_config(&ChunkingConfig::default()).unwrap();
        assert_eq!(default.strategy(), "fixed_overlap");
        assert_eq!(default.step(), 800);
    }

    proptest! {
        #[test]
        fn prop_invalid_iff_overlap_not_smaller(size in 0usize..64, overlap in 0usize..64) {
            let result = FixedOverlapChunker::new(size, overlap);
            prop_assert_eq!(result.is_err(), overlap >= size);
        }

        #[test]
        fn prop_count_is_windows_minus_blank(
            text in "[a-c ]{0,80}",
            size in 1usize..12,
            overlap_seed in 0usize..12,
        ) {
            let overlap = overlap_seed % size;
            let chunker = FixedOverlapChunker::new(size, overlap).unwrap();
            let normalized = normalize_whitespace(&text);
            let chars: Vec<char> = normalized.chars().collect();
            let step = size - overlap;

            let blank = (0..chars.len())
                .step_by(step)
                .filter(|&s| {
                    let end = (s + size).min(chars.len());
                    chars[s..end].iter().all(|c| c.is_whitespace())
                })
                .count();

            let chunks = chunker.chunk(&text);
            prop_assert_eq!(chunks.len(), chars.len().div_ceil(step) - blank);
        }

        #[test]
        fn prop_windows_cover_text_and_keep_order(
            text in "[a-z]{1,120}",
            size in 1usize..20,
            overlap_seed in 0usize..20,
        ) {
            let overlap = overlap_seed % size;
            let chunker = FixedOverlapChunker::new(size, overlap).unwrap();
            let chunks = chunker.chunk(&text);
            let chars: Vec<char> = text.chars().collect();

            let mut covered = vec![false; chars.len()];
            for chunk in &chunks {
                prop_assert!(chunk.char_len() <= size);
                let window: String = chars[chunk.offset..(chunk.offset + size).min(chars.len())]
                    .iter()
                    .collect();
                prop_assert_eq!(&window, &chunk.text);
                for flag in covered.iter_mut().skip(chunk.offset).take(chunk.char_len()) {
                    *flag = true;
                }
            }
            prop_assert!(covered.iter().all(|c| *c));
            prop_assert!(chunks.windows(2).all(|w| w[0].offset < w[1].offset));
        }

        #[test]
        fn prop_deterministic(text in "\\PC{0,200}", size in 1usize..30) {
            let chunker = FixedOverlapChunker::new(size, size / 3).unwrap();
            prop_assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
        }
    }
}
