//! Dictionary-free noun lemmatizer.
//!
//! Mirrors the inflection rules of WordNet noun morphology without carrying a
//! lexicon: irregular plurals come from a fixed exception table, regular
//! plurals are reduced by suffix rules. Every rule output is a fixed point, so
//! lemmatizing an already-lemmatized token returns it unchanged.

/// Irregular or ambiguous plurals whose suffix rules would produce a wrong base.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "people"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("axes", "axis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("headaches", "headache"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("series", "series"),
    ("species", "species"),
    ("sizes", "size"),
    ("quizzes", "quiz"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("cases", "case"),
    ("bases", "base"),
    ("uses", "use"),
    ("vases", "vase"),
    ("doses", "dose"),
    ("noses", "nose"),
    ("roses", "rose"),
    ("poses", "pose"),
    ("hoses", "hose"),
    ("fuses", "fuse"),
    ("rises", "rise"),
    ("raises", "raise"),
    ("noises", "noise"),
    ("phases", "phase"),
    ("leases", "lease"),
    ("causes", "cause"),
    ("pauses", "pause"),
    ("houses", "house"),
    ("horses", "horse"),
    ("nurses", "nurse"),
    ("purses", "purse"),
    ("curses", "curse"),
    ("verses", "verse"),
    ("senses", "sense"),
    ("tenses", "tense"),
    ("statuses", "status"),
    ("viruses", "virus"),
    ("campuses", "campus"),
    ("bonuses", "bonus"),
];

/// Words whose trailing `s` is part of the base form.
const PROTECTED: &[&str] = &[
    "statistics",
    "mathematics",
    "physics",
    "economics",
    "analytics",
    "robotics",
    "electronics",
    "logistics",
    "linguistics",
    "genetics",
    "graphics",
    "ethics",
    "pandas",
    "kubernetes",
    "jenkins",
    "aws",
    "news",
    "lens",
];

/// Endings that look plural but are part of the base form.
const NON_PLURAL_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Suffix rules, tried in order; the first matching suffix wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("s", ""),
];

/// `ses -> s` only reaches short stems (buses, gases); longer words such as
/// databases or courses drop just the final `s`.
const MAX_SES_STEM: usize = 3;

/// Shortest token the suffix rules are applied to.
const MIN_RULE_LENGTH: usize = 4;

/// Reduce a lower-cased token to its dictionary base form.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, base)) = EXCEPTIONS.iter().find(|(inflected, _)| *inflected == word) {
        return (*base).to_string();
    }
    if EXCEPTIONS.iter().any(|(_, base)| *base == word) {
        return word.to_string();
    }

    if word.len() < MIN_RULE_LENGTH
        || PROTECTED.contains(&word)
        || NON_PLURAL_ENDINGS.iter().any(|e| word.ends_with(e))
    {
        return word.to_string();
    }

    for (suffix, replacement) in SUFFIX_RULES {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        if !rule_applies(suffix, stem) {
            continue;
        }
        if stem.len() < 2 {
            break;
        }
        return format!("{stem}{replacement}");
    }

    word.to_string()
}

fn rule_applies(suffix: &str, stem: &str) -> bool {
    match suffix {
        "ses" => stem.len() <= MAX_SES_STEM,
        // buzzes -> buzz, but prizes -> prize
        "zes" => stem.ends_with('z'),
        _ => true,
    }
}
