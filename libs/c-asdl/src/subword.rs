//! # Subword Token Codec
//!
//! Identifier and string leaves may be encoded as subword pieces produced by
//! an external segmentation model. Pieces that begin a new word carry the
//! boundary marker `▁` as a prefix; every other piece continues the current
//! word.
//!
//! ```rust
//! use c_asdl::subword::spm_decode;
//!
//! let words = spm_decode(&["\u{2581}foo", "bar", "\u{2581}baz"]);
//! assert_eq!(words, ["foobar", "baz"]);
//! ```

use config::constants::SUBWORD_BOUNDARY_MARKER;

/// Segments text into subword pieces.
pub trait SubwordModel: Send + Sync {
    /// Split `text` into ordered pieces. Pieces starting a word are prefixed
    /// with the boundary marker.
    fn encode_as_pieces(&self, text: &str) -> Vec<String>;
}

impl<F> SubwordModel for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn encode_as_pieces(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Reassemble pieces into words using the default boundary marker.
pub fn spm_decode<S: AsRef<str>>(pieces: &[S]) -> Vec<String> {
    reassemble_words(pieces, SUBWORD_BOUNDARY_MARKER)
}

/// Reassemble pieces and join the words with single spaces.
pub fn spm_join<S: AsRef<str>>(pieces: &[S]) -> String {
    spm_decode(pieces).join(" ")
}

/// Reassemble pieces into words, splitting where a piece starts with `marker`.
///
/// Empty pieces are skipped. A first piece without the marker still starts
/// the first word; a lone marker starts an empty word.
pub fn reassemble_words<S: AsRef<str>>(pieces: &[S], marker: char) -> Vec<String> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;

    for piece in pieces.iter().map(AsRef::as_ref) {
        if piece.is_empty() {
            continue;
        }
        match piece.strip_prefix(marker) {
            Some(rest) => {
                if let Some(word) = current.replace(rest.to_string()) {
                    words.push(word);
                }
            }
            None => current.get_or_insert_with(String::new).push_str(piece),
        }
    }

    words.extend(current);
    words
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: [&str; 0] = [];

    #[test]
    fn test_empty_sequence() {
        assert!(spm_decode(&EMPTY).is_empty());
        assert_eq!(spm_join(&EMPTY), "");
    }

    #[test]
    fn test_unmarked_first_piece() {
        assert_eq!(spm_decode(&["foo"]), ["foo"]);
        assert_eq!(spm_decode(&["foo", "bar", "\u{2581}baz"]), ["foobar", "baz"]);
    }

    #[test]
    fn test_marked_pieces() {
        assert_eq!(spm_decode(&["\u{2581}foo", "bar", "\u{2581}baz"]), ["foobar", "baz"]);
        assert_eq!(spm_join(&["\u{2581}hello", "\u{2581}wor", "ld"]), "hello world");
    }

    #[test]
    fn test_lone_marker_and_empty_pieces() {
        assert_eq!(spm_decode(&["\u{2581}", "x"]), ["x"]);
        assert_eq!(spm_decode(&["\u{2581}a", "\u{2581}", "\u{2581}b"]), ["a", "", "b"]);
        assert_eq!(spm_decode(&["", "\u{2581}a", ""]), ["a"]);
    }

    #[test]
    fn test_custom_marker() {
        assert_eq!(reassemble_words(&["#ab", "c", "#d"], '#'), ["abc", "d"]);
    }

    #[test]
    fn test_closure_is_a_model() {
        let model = |text: &str| -> Vec<String> {
            text.split(' ').map(|w| format!("\u{2581}{w}")).collect()
        };
        let pieces = model.encode_as_pieces("a b");
        assert_eq!(spm_join(&pieces), "a b");
    }
}
