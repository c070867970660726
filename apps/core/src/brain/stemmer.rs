//! Portuguese suffix stripper (RSLP family).
//!
//! Words pass through ordered reduction steps: plural, feminine,
//! augmentative, adverb, then noun, falling back to verb and finally
//! vowel removal when the previous step left the word unchanged.
//! Each step applies the first rule whose suffix matches, whose remaining
//! stem is long enough, and whose exception list does not contain the word.

/// A single suffix rule.
struct Rule {
    suffix: &'static str,
    /// Minimum stem length (in chars) left after removing the suffix.
    min_stem: usize,
    replacement: &'static str,
    exceptions: &'static [&'static str],
}

const fn r(suffix: &'static str, min_stem: usize, replacement: &'static str) -> Rule {
    Rule {
        suffix,
        min_stem,
        replacement,
        exceptions: &[],
    }
}

const fn rx(
    suffix: &'static str,
    min_stem: usize,
    replacement: &'static str,
    exceptions: &'static [&'static str],
) -> Rule {
    Rule {
        suffix,
        min_stem,
        replacement,
        exceptions,
    }
}

const PLURAL: &[Rule] = &[
    r("ns", 1, "m"),
    r("ões", 3, "ão"),
    rx("ães", 1, "ão", &["mães"]),
    rx("ais", 1, "al", &["cais", "mais"]),
    r("éis", 2, "el"),
    r("eis", 2, "el"),
    r("óis", 2, "ol"),
    rx(
        "is",
        2,
        "il",
        &["lápis", "cais", "mais", "crúcis", "biquínis", "pois", "depois", "dois", "leis"],
    ),
    r("les", 3, "l"),
    rx("res", 3, "r", &["árvores"]),
    rx(
        "s",
        2,
        "",
        &[
            "aliás", "pires", "lápis", "cais", "mais", "mas", "menos", "férias", "fezes",
            "pêsames", "crúcis", "gás", "atrás", "moisés", "através", "convés", "ês", "país",
            "após", "ambas", "ambos", "messias", "depois",
        ],
    ),
];

const FEMININE: &[Rule] = &[
    rx(
        "ona",
        3,
        "ão",
        &["abandona", "lona", "iona", "cortisona", "monótona", "maratona", "acetona", "detona", "carona"],
    ),
    r("ora", 3, "or"),
    rx(
        "na",
        4,
        "no",
        &[
            "carona", "abandona", "lona", "iona", "cortisona", "monótona", "maratona", "acetona",
            "detona", "guiana", "campana", "grana", "caravana", "banana", "paisana",
        ],
    ),
    rx("inha", 3, "inho", &["rainha", "linha", "minha"]),
    rx("esa", 3, "ês", &["mesa", "obesa", "princesa", "turquesa", "ilesa", "pesa", "presa"]),
    rx("osa", 3, "oso", &["mucosa", "prosa"]),
    r("íaca", 3, "íaco"),
    rx("ica", 3, "ico", &["dica"]),
    rx("ada", 2, "ado", &["pitada"]),
    rx("ida", 3, "ido", &["vida", "dúvida"]),
    rx("ída", 3, "ido", &["recaída", "saída"]),
    rx("ima", 3, "imo", &["vítima"]),
    rx("iva", 3, "ivo", &["saliva", "oliva"]),
    rx(
        "eira",
        3,
        "eiro",
        &[
            "beira", "cadeira", "frigideira", "bandeira", "feira", "capoeira", "barreira",
            "fronteira", "besteira", "poeira",
        ],
    ),
];

const ADVERB: &[Rule] = &[rx("mente", 4, "", &["experimente"])];

const AUGMENTATIVE: &[Rule] = &[
    r("díssimo", 5, ""),
    r("abilíssimo", 5, ""),
    r("íssimo", 3, ""),
    r("ésimo", 3, ""),
    r("érrimo", 4, ""),
    r("zinho", 2, ""),
    r("quinho", 4, "c"),
    r("uinho", 4, ""),
    r("adinho", 3, ""),
    rx("inho", 3, "", &["caminho", "cominho"]),
    r("alhão", 4, ""),
    r("uça", 4, ""),
    rx("aço", 4, "", &["antebraço"]),
    r("aça", 4, ""),
    r("adão", 4, ""),
    r("idão", 4, ""),
    rx("ázio", 3, "", &["topázio"]),
    r("arraz", 4, ""),
    r("zarrão", 3, ""),
    r("arrão", 4, ""),
    rx("zão", 2, "", &["coalizão"]),
    rx(
        "ão",
        3,
        "",
        &[
            "camarão", "chimarrão", "canção", "coração", "embrião", "grotão", "glutão", "ficção",
            "fogão", "feição", "furacão", "gamão", "lampião", "leão", "macacão", "nação", "órfão",
            "orgão", "patrão", "portão", "quinhão", "rincão", "tração", "falcão", "espião",
            "mamão", "folião", "cordão", "aptidão", "campeão", "colchão", "limão", "leilão",
            "melão", "barão", "milhão", "bilhão", "fusão", "cristão", "ilusão", "capitão",
            "estação", "senão",
        ],
    ),
    r("zito", 2, ""),
    rx("ito", 3, "", &["mosquito", "gatito"]),
];

const NOUN: &[Rule] = &[
    r("encialista", 4, ""),
    r("alista", 5, ""),
    rx("agem", 3, "", &["coragem", "chantagem", "vantagem", "carruagem"]),
    r("iamento", 4, ""),
    rx("amento", 3, "", &["firmamento", "fundamento", "departamento"]),
    r("imento", 3, ""),
    rx(
        "mento",
        6,
        "",
        &["firmamento", "elemento", "complemento", "instrumento", "departamento"],
    ),
    r("alizado", 4, ""),
    r("atizado", 4, ""),
    rx("tizado", 4, "", &["alfabetizado"]),
    rx("izado", 5, "", &["organizado", "pulverizado"]),
    rx("ativo", 4, "", &["pejorativo", "relativo"]),
    rx("tivo", 4, "", &["relativo"]),
    rx("ivo", 4, "", &["passivo", "possessivo", "pejorativo", "positivo"]),
    rx("ado", 2, "", &["grado"]),
    rx(
        "ido",
        3,
        "",
        &["cândido", "consolidado", "rápido", "decido", "tímido", "duvido", "marido"],
    ),
    r("ador", 3, ""),
    r("edor", 3, ""),
    rx("idor", 4, "", &["ouvidor"]),
    rx("dor", 4, "", &["ouvidor"]),
    rx("sor", 4, "", &["assessor"]),
    r("atoria", 5, ""),
    rx(
        "tor",
        3,
        "",
        &["benfeitor", "leitor", "editor", "pastor", "produtor", "promotor", "consultor"],
    ),
    rx(
        "or",
        2,
        "",
        &[
            "motor", "melhor", "redor", "rigor", "sensor", "tambor", "tumor", "assessor",
            "benfeitor", "pastor", "terior", "favor", "autor",
        ],
    ),
    r("abilidade", 5, ""),
    r("icionista", 4, ""),
    r("cionista", 5, ""),
    r("ionista", 5, ""),
    r("ionar", 5, ""),
    r("ional", 4, ""),
    r("ência", 3, ""),
    rx("ância", 4, "", &["ambulância"]),
    r("edouro", 3, ""),
    r("queiro", 3, "c"),
    rx("adeiro", 4, "", &["desfiladeiro"]),
    rx("eiro", 3, "", &["desfiladeiro", "pioneiro", "mosteiro"]),
    r("uoso", 3, ""),
    rx("oso", 3, "", &["precioso"]),
    r("alizaç", 5, ""),
    r("atizaç", 5, ""),
    r("tizaç", 5, ""),
    rx("izaç", 5, "", &["organizaç"]),
    rx("aç", 3, "", &["equaç", "relaç"]),
    rx("iç", 3, "", &["eleiç"]),
    rx(
        "ário",
        3,
        "",
        &["voluntário", "salário", "aniversário", "diário", "lionário", "armário"],
    ),
    r("atório", 3, ""),
    rx(
        "rio",
        5,
        "",
        &[
            "voluntário", "salário", "aniversário", "diário", "compulsório", "lionário",
            "próprio", "stério", "armário",
        ],
    ),
    r("ério", 6, ""),
    r("ês", 4, ""),
    r("eza", 3, ""),
    r("ez", 4, ""),
    r("esco", 4, ""),
    rx(
        "ante",
        2,
        "",
        &["gigante", "elefante", "adiante", "possante", "instante", "restaurante"],
    ),
    rx("ástico", 4, "", &["eclesiástico"]),
    r("alístico", 3, ""),
    r("áutico", 4, ""),
    r("êutico", 4, ""),
    rx(
        "tico",
        3,
        "",
        &[
            "político", "eclesiástico", "diagnostico", "prático", "doméstico", "diagnóstico",
            "idêntico", "alopático", "artístico", "autêntico", "eclético", "crítico", "critico",
        ],
    ),
    rx("ico", 4, "", &["tico", "público", "explico"]),
    r("ividade", 5, ""),
    rx("idade", 4, "", &["autoridade", "comunidade"]),
    rx("oria", 4, "", &["categoria"]),
    r("encial", 5, ""),
    r("ista", 4, ""),
    r("auta", 5, ""),
    r("quice", 4, "c"),
    rx("ice", 4, "", &["cúmplice"]),
    r("íaco", 3, ""),
    rx(
        "ente",
        4,
        "",
        &["freqüente", "alimente", "acrescente", "permanente", "oriente", "aparente"],
    ),
    r("ense", 5, ""),
    r("inal", 3, ""),
    r("ano", 4, ""),
    rx("ável", 2, "", &["afável", "razoável", "potável", "vulnerável"]),
    rx("ível", 3, "", &["possível"]),
    rx("vel", 5, "", &["possível", "vulnerável", "solúvel"]),
    rx("bil", 3, "", &["vil"]),
    rx("ura", 4, "", &["imatura", "acupuntura", "costura"]),
    r("ural", 4, ""),
    rx("ual", 3, "", &["bissexual", "virtual", "visual", "pontual"]),
    r("ial", 3, ""),
    rx(
        "al",
        4,
        "",
        &[
            "afinal", "animal", "estatal", "bissexual", "desleal", "fiscal", "formal", "pessoal",
            "liberal", "postal", "virtual", "visual", "pontual", "sideral", "sucursal",
        ],
    ),
    r("alismo", 4, ""),
    r("ivismo", 4, ""),
    rx("ismo", 3, "", &["cinismo"]),
];

const VERB: &[Rule] = &[
    r("aríamo", 2, ""),
    r("ássemo", 2, ""),
    r("eríamo", 2, ""),
    r("êssemo", 2, ""),
    r("iríamo", 3, ""),
    r("íssemo", 3, ""),
    r("áramo", 2, ""),
    r("árei", 2, ""),
    r("aremo", 2, ""),
    r("ariam", 2, ""),
    r("aríei", 2, ""),
    r("ássei", 2, ""),
    r("assem", 2, ""),
    r("ávamo", 2, ""),
    r("êramo", 3, ""),
    r("eremo", 3, ""),
    r("eriam", 3, ""),
    r("eríei", 3, ""),
    r("êssei", 3, ""),
    r("essem", 3, ""),
    r("íramo", 3, ""),
    r("iremo", 3, ""),
    r("iriam", 3, ""),
    r("iríei", 3, ""),
    r("íssei", 3, ""),
    r("issem", 3, ""),
    r("ando", 2, ""),
    r("endo", 3, ""),
    r("indo", 3, ""),
    r("ondo", 3, ""),
    r("aram", 2, ""),
    r("arão", 2, ""),
    r("arde", 2, ""),
    r("arei", 2, ""),
    r("arem", 2, ""),
    r("aria", 2, ""),
    r("armo", 2, ""),
    r("asse", 2, ""),
    r("aste", 2, ""),
    rx("avam", 2, "", &["agravam"]),
    r("ávei", 2, ""),
    r("eram", 3, ""),
    r("erão", 3, ""),
    r("erde", 3, ""),
    r("erei", 3, ""),
    r("êrei", 3, ""),
    r("erem", 3, ""),
    r("eria", 3, ""),
    r("ermo", 3, ""),
    r("esse", 3, ""),
    rx("este", 3, "", &["faroeste", "agreste"]),
    r("íamo", 3, ""),
    r("iram", 3, ""),
    r("íram", 3, ""),
    r("irão", 2, ""),
    r("irde", 2, ""),
    rx("irei", 3, "", &["admirei"]),
    rx("irem", 3, "", &["adquirem"]),
    r("iria", 3, ""),
    r("irmo", 3, ""),
    r("isse", 3, ""),
    r("iste", 4, ""),
    rx("iava", 4, "", &["ampliava"]),
    r("amo", 2, ""),
    r("iona", 3, ""),
    rx("ara", 2, "", &["arara", "prepara"]),
    rx("ará", 2, "", &["alvará"]),
    rx("are", 2, "", &["prepare"]),
    rx("ava", 2, "", &["agrava"]),
    r("emo", 2, ""),
    rx("era", 3, "", &["acelera", "espera"]),
    r("erá", 3, ""),
    rx("ere", 3, "", &["espere"]),
    rx("iam", 3, "", &["enfiam", "ampliam", "elogiam", "ensaiam"]),
    r("íei", 3, ""),
    rx("imo", 3, "", &["reprimo", "intimo", "íntimo", "nimo", "queimo", "ximo"]),
    rx("ira", 3, "", &["fronteira", "sátira"]),
    r("ído", 3, ""),
    r("irá", 3, ""),
    rx("tizar", 4, "", &["alfabetizar"]),
    rx("izar", 5, "", &["organizar"]),
    rx("itar", 5, "", &["acreditar", "explicitar", "estreitar"]),
    rx("ire", 3, "", &["adquire"]),
    r("omo", 3, ""),
    r("ai", 2, ""),
    r("am", 2, ""),
    rx("ear", 4, "", &["alardear", "nuclear"]),
    rx("ar", 2, "", &["azar", "bazaar", "patamar"]),
    r("uei", 3, ""),
    r("ei", 3, ""),
    r("guem", 3, "g"),
    rx("em", 2, "", &["alem", "virgem"]),
    rx("er", 2, "", &["éter", "pier"]),
    rx("eu", 3, "", &["chapeu"]),
    rx(
        "ia",
        3,
        "",
        &[
            "estória", "fatia", "acia", "praia", "elogia", "mania", "lábia", "aprecia",
            "polícia", "arredia", "cheia", "ásia",
        ],
    ),
    rx("ir", 3, "", &["freir"]),
    r("iu", 3, ""),
    r("eou", 5, ""),
    r("ou", 3, ""),
    r("i", 3, ""),
];

const VOWEL: &[Rule] = &[
    r("bil", 2, "vel"),
    rx("gue", 2, "g", &["gangue", "jegue"]),
    r("á", 3, ""),
    rx("ê", 3, "", &["bebê"]),
    rx("a", 3, "", &["ásia"]),
    r("e", 3, ""),
    rx("o", 3, "", &["ão"]),
];

/// Applies the first matching rule of a step, or returns `None` when none fires.
fn apply_step(word: &str, rules: &[Rule]) -> Option<String> {
    let word_len = word.chars().count();
    rules.iter().find_map(|rule| {
        if !word.ends_with(rule.suffix) {
            return None;
        }
        let suffix_len = rule.suffix.chars().count();
        if word_len < suffix_len + rule.min_stem || rule.exceptions.contains(&word) {
            return None;
        }
        let cut = word.len() - rule.suffix.len();
        Some(format!("{}{}", &word[..cut], rule.replacement))
    })
}

/// Portuguese stemmer. Stateless; one instance can be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct RslpStemmer;

impl RslpStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Stems a single lower-case token. Empty input stays empty.
    pub fn stem(&self, token: &str) -> String {
        let mut word = token.to_string();
        if word.is_empty() {
            return word;
        }

        if word.ends_with('s') {
            if let Some(w) = apply_step(&word, PLURAL) {
                word = w;
            }
        }
        if word.ends_with('a') {
            if let Some(w) = apply_step(&word, FEMININE) {
                word = w;
            }
        }
        if let Some(w) = apply_step(&word, AUGMENTATIVE) {
            word = w;
        }
        if let Some(w) = apply_step(&word, ADVERB) {
            word = w;
        }

        if let Some(w) = apply_step(&word, NOUN) {
            return w;
        }
        if let Some(w) = apply_step(&word, VERB) {
            return w;
        }
        apply_step(&word, VOWEL).unwrap_or(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_then_vowel() {
        let stemmer = RslpStemmer::new();
        assert_eq!(stemmer.stem("problemas"), "problem");
    }

    #[test]
    fn test_adverb_reduction() {
        let stemmer = RslpStemmer::new();
        assert_eq!(stemmer.stem("rapidamente"), "rapid");
    }

    #[test]
    fn test_augmentative_then_noun() {
        let stemmer = RslpStemmer::new();
        assert_eq!(stemmer.stem("solicitação"), "solicit");
    }

    #[test]
    fn test_vowel_removal() {
        let stemmer = RslpStemmer::new();
        assert_eq!(stemmer.stem("erro"), "err");
        assert_eq!(stemmer.stem("suporte"), "suport");
    }

    #[test]
    fn test_exceptions_are_kept() {
        let stemmer = RslpStemmer::new();
        // "mais" is a plural exception and ends in no removable vowel
        assert_eq!(stemmer.stem("mais"), "mais");
    }

    #[test]
    fn test_short_and_empty_tokens() {
        let stemmer = RslpStemmer::new();
        assert_eq!(stemmer.stem(""), "");
        assert_eq!(stemmer.stem("a"), "a");
        assert_eq!(stemmer.stem("12345"), "12345");
    }
}
