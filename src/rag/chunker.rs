//! Word-window text chunking.

pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker producing windows of `chunk_size` words with
    /// `chunk_overlap` words shared between consecutive windows.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(chunk_size.saturating_sub(1)),
        }
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut chunks = Vec::new();
        let step = (self.chunk_size - self.chunk_overlap).max(1);

        for i in (0..words.len()).step_by(step) {
            let end = (i + self.chunk_size).min(words.len());
            chunks.push(words[i..end].join(" "));
            if end == words.len() {
                break;
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = TextChunker::new(200, 20);
        let chunks = chunker.chunk("Python is a programming language");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "Python is a programming language");
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = TextChunker::new(200, 20);
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t ").is_empty());
    }

    #[test]
    fn test_overlapping_windows() {
        let chunker = TextChunker::new(4, 2);
        let text = "a b c d e f g h";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks[0], "a b c d");
        assert_eq!(chunks[1], "c d e f");
        assert_eq!(chunks[2], "e f g h");
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_overlap_clamped_below_chunk_size() {
        // Overlap >= size would never advance; the chunker clamps it.
        let chunker = TextChunker::new(2, 5);
        let chunks = chunker.chunk("a b c d");
        assert!(chunks.len() >= 2);
        assert_eq!(chunks.last().unwrap(), "c d");
    }
}
