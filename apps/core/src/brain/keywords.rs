//! Keyword tables and the keyword-count heuristic classifier.
//!
//! Holds the Portuguese stop-word set used by the normalizer, and the
//! indicator word lists that drive classification when no remote model is
//! configured.

use crate::models::{Category, ClassificationVerdict};

/// Stopwords for Portuguese
pub const STOPWORDS_PT: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às", "até",
    "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do", "dos",
    "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "éramos", "essa",
    "essas", "esse", "esses", "esta", "está", "estamos", "estão", "estar", "estas", "estava",
    "estavam", "estávamos", "este", "esteja", "estejam", "estejamos", "estes", "esteve",
    "estive", "estivemos", "estiver", "estivera", "estiveram", "estivéramos", "estiverem",
    "estivermos", "estivesse", "estivessem", "estivéssemos", "estou", "eu", "foi", "fomos",
    "for", "fora", "foram", "fôramos", "forem", "formos", "fosse", "fossem", "fôssemos", "fui",
    "há", "haja", "hajam", "hajamos", "hão", "havemos", "haver", "hei", "houve", "houvemos",
    "houver", "houvera", "houverá", "houveram", "houvéramos", "houverão", "houverei",
    "houverem", "houveremos", "houveria", "houveriam", "houveríamos", "houvermos", "houvesse",
    "houvessem", "houvéssemos", "isso", "isto", "já", "lhe", "lhes", "mais", "mas", "me",
    "mesmo", "meu", "meus", "minha", "minhas", "muito", "na", "não", "nas", "nem", "no", "nos",
    "nós", "nossa", "nossas", "nosso", "nossos", "num", "numa", "o", "os", "ou", "para", "pela",
    "pelas", "pelo", "pelos", "por", "qual", "quando", "que", "quem", "são", "se", "seja",
    "sejam", "sejamos", "sem", "ser", "será", "serão", "serei", "seremos", "seria", "seriam",
    "seríamos", "seu", "seus", "só", "somos", "sou", "sua", "suas", "também", "te", "tem", "tém",
    "temos", "tenha", "tenham", "tenhamos", "tenho", "terá", "terão", "terei", "teremos",
    "teria", "teriam", "teríamos", "teu", "teus", "teve", "tinha", "tinham", "tínhamos", "tive",
    "tivemos", "tiver", "tivera", "tiveram", "tivéramos", "tiverem", "tivermos", "tivesse",
    "tivessem", "tivéssemos", "tu", "tua", "tuas", "um", "uma", "você", "vocês", "vos",
];

/// Terms that signal an email needing action (requests, problems, follow-ups).
pub const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "solicitação",
    "solicitacao",
    "dúvida",
    "duvida",
    "problema",
    "suporte",
    "ajuda",
    "status",
    "atualização",
    "atualizacao",
    "erro",
    "falha",
    "requisição",
    "requisicao",
    "reclamação",
    "reclamacao",
];

/// Terms that signal a social or informational email.
pub const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    "parabéns",
    "parabens",
    "feliz",
    "obrigado",
    "agradecimento",
    "natal",
    "aniversário",
    "aniversario",
    "motivacional",
    "inspiração",
    "inspiracao",
];

/// Appended to every heuristic justification so callers can tell it apart from model output.
pub const SIMULATION_MARKER: &str = "[SIMULAÇÃO]";

/// Keyword hit counts for both categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordScore {
    pub productive: usize,
    pub unproductive: usize,
}

/// Deterministic classifier counting indicator terms in the text.
pub struct KeywordClassifier {
    productive: &'static [&'static str],
    unproductive: &'static [&'static str],
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self {
            productive: PRODUCTIVE_KEYWORDS,
            unproductive: UNPRODUCTIVE_KEYWORDS,
        }
    }

    /// Counts how many terms of each list occur (case-insensitive substring) in the text.
    pub fn score(&self, text: &str) -> KeywordScore {
        let lower = text.to_lowercase();
        let hits = |terms: &[&str]| terms.iter().filter(|term| lower.contains(*term)).count();

        KeywordScore {
            productive: hits(self.productive),
            unproductive: hits(self.unproductive),
        }
    }

    /// Picks the category with the strictly higher count.
    ///
    /// Ties (including no hits at all) default to productive with confidence 0.5.
    pub fn classify(&self, text: &str) -> ClassificationVerdict {
        let score = self.score(text);

        let (category, confidence, justification) = if score.productive > score.unproductive {
            (
                Category::Productive,
                confidence_for(score.productive),
                "Email contém indicadores de solicitação ou problema",
            )
        } else if score.unproductive > score.productive {
            (
                Category::Unproductive,
                confidence_for(score.unproductive),
                "Email contém mensagem não-urgente ou social",
            )
        } else {
            (
                Category::Productive,
                0.5,
                "Classificação padrão por incerteza (modo simulação)",
            )
        };

        ClassificationVerdict {
            category,
            confidence,
            justification: format!("{} {}", justification, SIMULATION_MARKER),
        }
    }
}

fn confidence_for(hits: usize) -> f64 {
    (0.6 + 0.1 * hits as f64).min(0.95)
}
