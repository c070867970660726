//! Text normalization for incoming emails.
//!
//! Two outputs are derived from the raw body:
//! - signature-stripped text, kept in natural language for reply generation;
//! - NLP-reduced text (clean, tokenize, drop stop words, stem), fed only to
//!   the classification prompt.
//!
//! Every stage is total: empty input gives empty output, never an error.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::keywords::STOPWORDS_PT;
use super::stemmer::RslpStemmer;

// Compiled once; every pattern is forced in test_static_patterns_compile.
static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("Invalid regex: control characters")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid regex: newline run"));

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").expect("Invalid regex: space before punctuation"));

static SPACE_AFTER_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,!?;:])\s+").expect("Invalid regex: space after punctuation"));

// One alternation so the leftmost marker in the text wins, whatever its kind.
static SIGNATURE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\n(?:-{2,}[ \t]*(?:\r?\n|$)|atenciosamente,|att,|cordialmente,|_{3,}|enviado do meu|sent from my)",
    )
    .expect("Invalid regex: signature markers")
});

// Word tokens with inner hyphens/apostrophes, or runs of punctuation.
static WORD_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\w+(?:['-]\w+)*|[^\w\s]+")
        .map_err(|e| warn!("Word tokenizer unavailable, using whitespace split: {}", e))
        .ok()
});

/// Normalizes email bodies for prompting.
pub struct TextNormalizer {
    stopwords: HashSet<&'static str>,
    stemmer: RslpStemmer,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS_PT.iter().copied().collect(),
            stemmer: RslpStemmer::new(),
        }
    }

    /// Cuts the text right before the earliest signature marker, then trims.
    pub fn strip_signature(&self, text: &str) -> String {
        match SIGNATURE_MARKER.find(text) {
            Some(m) => {
                debug!(cut_at = m.start(), "Signature block removed");
                text[..m.start()].trim().to_string()
            }
            None => text.trim().to_string(),
        }
    }

    /// Removes control characters, collapses whitespace, and tightens punctuation spacing.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = CONTROL_CHARS.replace_all(text, "");
        let text = NEWLINE_RUN.replace_all(&text, "\n\n");
        let text = WHITESPACE_RUN.replace_all(&text, " ");
        let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
        let text = SPACE_AFTER_PUNCT.replace_all(&text, "$1 ");

        text.trim().to_string()
    }

    /// Lower-cases and splits into word and punctuation tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        match WORD_TOKEN.as_ref() {
            Some(pattern) => pattern
                .find_iter(&lower)
                .map(|m| m.as_str().to_string())
                .collect(),
            None => Self::whitespace_tokens(&lower),
        }
    }

    fn whitespace_tokens(lower: &str) -> Vec<String> {
        lower.split_whitespace().map(str::to_string).collect()
    }

    /// Keeps alphanumeric tokens that are not Portuguese stop words, in order.
    pub fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
        let before = tokens.len();
        let kept: Vec<String> = tokens
            .into_iter()
            .filter(|t| !t.is_empty() && t.chars().all(char::is_alphanumeric))
            .filter(|t| !self.stopwords.contains(t.as_str()))
            .collect();
        debug!(removed = before - kept.len(), "Stop words removed");
        kept
    }

    /// Stems every token; order and count are preserved.
    pub fn stem(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.iter().map(|t| self.stemmer.stem(t)).collect()
    }

    /// Full reduction used for the classification prompt only.
    pub fn reduce_for_classification(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let cleaned = self.clean(text);
        let tokens = self.tokenize(&cleaned);
        let tokens = self.remove_stopwords(tokens);
        let reduced = self.stem(tokens).join(" ");

        debug!(
            original_chars = text.chars().count(),
            reduced_chars = reduced.chars().count(),
            "Text reduced for classification"
        );
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_patterns_compile() {
        LazyLock::force(&CONTROL_CHARS);
        LazyLock::force(&WHITESPACE_RUN);
        LazyLock::force(&NEWLINE_RUN);
        LazyLock::force(&SPACE_BEFORE_PUNCT);
        LazyLock::force(&SPACE_AFTER_PUNCT);
        LazyLock::force(&SIGNATURE_MARKER);
        assert!(WORD_TOKEN.is_some());
    }

    #[test]
    fn test_strip_signature_without_marker() {
        let n = TextNormalizer::new();
        assert_eq!(n.strip_signature("Hello world"), "Hello world");
        assert_eq!(n.strip_signature("  Hello world \n"), "Hello world");
    }

    #[test]
    fn test_strip_signature_markers() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.strip_signature("Preciso do relatório.\nAtenciosamente,\nJoão"),
            "Preciso do relatório."
        );
        assert_eq!(
            n.strip_signature("Segue o anexo.\n--\nMaria Souza\nGerente"),
            "Segue o anexo."
        );
        assert_eq!(
            n.strip_signature("Pode verificar?\n\nEnviado do meu iPhone"),
            "Pode verificar?"
        );
        assert_eq!(n.strip_signature("Ok, obrigado\n_____\nrodapé"), "Ok, obrigado");
        assert_eq!(n.strip_signature("See below\nsent from my phone"), "See below");
    }

    #[test]
    fn test_strip_signature_earliest_marker_wins() {
        let n = TextNormalizer::new();
        // "Att," appears before "Atenciosamente," even though it is listed later.
        let text = "Pedido urgente.\nAtt,\nCarlos\nAtenciosamente,\nEquipe";
        assert_eq!(n.strip_signature(text), "Pedido urgente.");
    }

    #[test]
    fn test_strip_signature_is_case_insensitive_and_never_grows() {
        let n = TextNormalizer::new();
        let text = "Status do chamado?\nCORDIALMENTE,\nAna";
        let stripped = n.strip_signature(text);
        assert_eq!(stripped, "Status do chamado?");
        assert!(stripped.len() <= text.len());
    }

    #[test]
    fn test_strip_signature_ignores_inline_words() {
        let n = TextNormalizer::new();
        let text = "Falei com o Matt, ele confirmou";
        assert_eq!(n.strip_signature(text), text);
    }

    #[test]
    fn test_clean_whitespace_and_punctuation() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.clean("Olá ,   tudo bem ?\n\n\n\nPreciso   de ajuda !"),
            "Olá, tudo bem? Preciso de ajuda!"
        );
    }

    #[test]
    fn test_clean_removes_control_characters() {
        let n = TextNormalizer::new();
        assert_eq!(n.clean("erro\u{0007} no\u{0000} sistema\u{007F}"), "erro no sistema");
        assert_eq!(n.clean("a \u{0001} b"), "a b");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let n = TextNormalizer::new();
        let samples = [
            "",
            "   ",
            "a , , b",
            "Olá ,   tudo bem ?\n\n\n\nSim.Ok",
            "x \u{0001} ; y\t\t:z",
            " .início",
            "fim .",
            "3.14 , 2,71",
        ];
        for s in samples {
            let once = n.clean(s);
            assert_eq!(n.clean(&once), once, "clean not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_punctuation() {
        let n = TextNormalizer::new();
        let tokens = n.tokenize("Olá, Equipe! Requisição #12345 está pendente.");
        assert_eq!(
            tokens,
            vec!["olá", ",", "equipe", "!", "requisição", "#", "12345", "está", "pendente", "."]
        );
    }

    #[test]
    fn test_remove_stopwords_keeps_order() {
        let n = TextNormalizer::new();
        let tokens = n.tokenize("O sistema de pagamentos não está funcionando!");
        let kept = n.remove_stopwords(tokens);
        assert_eq!(kept, vec!["sistema", "pagamentos", "funcionando"]);
    }

    #[test]
    fn test_stem_preserves_count() {
        let n = TextNormalizer::new();
        let tokens: Vec<String> = ["problemas", "erro", "a", "12345"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stemmed = n.stem(tokens.clone());
        assert_eq!(stemmed.len(), tokens.len());
        assert_eq!(stemmed[0], "problem");
    }

    #[test]
    fn test_empty_input_everywhere() {
        let n = TextNormalizer::new();
        assert_eq!(n.strip_signature(""), "");
        assert_eq!(n.clean(""), "");
        assert!(n.tokenize("").is_empty());
        assert!(n.remove_stopwords(vec![]).is_empty());
        assert!(n.stem(vec![]).is_empty());
        assert_eq!(n.reduce_for_classification(""), "");
    }

    #[test]
    fn test_reduce_for_classification() {
        let n = TextNormalizer::new();
        let reduced = n.reduce_for_classification("Temos um erro no suporte, problemas!");
        assert_eq!(reduced, "err suport problem");
    }
}
