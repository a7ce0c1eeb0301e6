use ndarray::ArrayView1;
use unicode_segmentation::UnicodeSegmentation;

/// Deterministic, model-free embedder.
///
/// Each identifier-aware token is hashed into one of `dimension` buckets with
/// a hash-derived sign; the resulting bag is L2-normalized. Texts sharing
/// vocabulary (including camelCase/snake_case parts) end up close in cosine
/// space.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embed one text. Text without any token yields the zero vector.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimension];
        for token in tokenize(text) {
            let hash = fnv1a_64(token.as_bytes());
            #[allow(clippy::cast_possible_truncation)]
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            vec[bucket] += sign;
        }
        normalize(&mut vec);
        vec
    }

    /// Cosine similarity. Mismatched lengths or zero vectors score 0.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let a = ArrayView1::from(a);
        let b = ArrayView1::from(b);
        let norm_a = a.dot(&a).sqrt();
        let norm_b = b.dot(&b).sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        a.dot(&b) / (norm_a * norm_b)
    }
}

/// Lowercased tokens for `text`.
///
/// Every word is emitted whole and, when it is a compound identifier, also
/// as its camelCase / snake_case parts: `getUserName` → `getusername`, `get`,
/// `user`, `name`. Single-character tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in text.unicode_words() {
        let parts = split_identifier(word);
        let whole = word.to_lowercase();
        if whole.chars().count() > 1 {
            tokens.push(whole.clone());
        }
        if parts.len() > 1 {
            tokens.extend(
                parts
                    .into_iter()
                    .map(|part| part.to_lowercase())
                    .filter(|part| part.chars().count() > 1 && *part != whole),
            );
        }
    }
    tokens
}

fn split_identifier(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    for segment in word.split('_').filter(|s| !s.is_empty()) {
        let chars: Vec<(usize, char)> = segment.char_indices().collect();
        let mut start = 0usize;
        for i in 1..chars.len() {
            let (idx, current) = chars[i];
            let previous = chars[i - 1].1;
            let next_is_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_lowercase());
            let boundary = (previous.is_lowercase() && current.is_uppercase())
                || (previous.is_uppercase() && current.is_uppercase() && next_is_lower)
                || (previous.is_alphabetic() && current.is_ascii_digit())
                || (previous.is_ascii_digit() && current.is_alphabetic());
            if boundary {
                parts.push(&segment[start..idx]);
                start = idx;
            }
        }
        parts.push(&segment[start..]);
    }
    parts
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_splits_identifiers() {
        assert_eq!(
            tokenize("getUserName"),
            vec!["getusername", "get", "user", "name"]
        );
        assert_eq!(tokenize("max_retry_count"), vec!["max_retry_count", "max", "retry", "count"]);
        assert_eq!(tokenize("HTTPServer v2"), vec!["httpserver", "http", "server", "v2"]);
        assert!(tokenize("a + b").is_empty());
    }

    #[test]
    fn embeddings_are_unit_length_and_deterministic() {
        let embedder = HashingEmbedder::new(64);
        let a = embedder.embed("fn parse_config(path: &str)");
        let b = embedder.embed("fn parse_config(path: &str)");
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn shared_vocabulary_scores_higher() {
        let embedder = HashingEmbedder::new(256);
        let query = embedder.embed("user session");
        let related = embedder.embed("class UserSession { refreshSession() {} }");
        let unrelated = embedder.embed("matrix multiply kernel tiles");

        let close = HashingEmbedder::cosine_similarity(&query, &related);
        let far = HashingEmbedder::cosine_similarity(&query, &unrelated);
        assert!(close > far, "close={close} far={far}");
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(8);
        let zero = embedder.embed("   ");
        assert!(zero.iter().all(|v| *v == 0.0));
        assert_eq!(HashingEmbedder::cosine_similarity(&zero, &embedder.embed("word")), 0.0);
        assert_eq!(HashingEmbedder::cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }
}
