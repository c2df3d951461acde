//! Name inflection for generated surfaces: discriminator names are the
//! snake-cased type name, scope names are the pluralized discriminator.
//! Pluralization follows English inflection rules, not naive `+s`.

use convert_case::{Case, Casing};

// Words that pluralize irregularly.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("index", "indices"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("quiz", "quizzes"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

// Words whose plural is the singular.
const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "series",
    "sheep",
    "species",
];

// `-f`/`-fe` endings that take `-ves` (the rest just append `s`).
const F_TO_VES: &[(&str, &str)] = &[
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("shelf", "shelves"),
    ("wolf", "wolves"),
];

// `-o` endings that take `-oes` (the rest just append `s`).
const O_TO_OES: &[&str] = &["echo", "hero", "potato", "tomato", "torpedo", "veto"];

/// Snake-cased type name for a Rust type identifier (`VideoClip` ->
/// `video_clip`).
pub fn type_name(ident: &str) -> String {
    ident.to_case(Case::Snake)
}

/// Scope name for a discriminator: the final snake segment is pluralized,
/// earlier segments pass through (`video_clip` -> `video_clips`).
pub fn scope_name(type_name: &str) -> String {
    match type_name.rsplit_once('_') {
        Some((head, tail)) => format!("{head}_{}", pluralize(tail)),
        None => pluralize(type_name),
    }
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Pluralize one lower-case English word.
pub fn pluralize(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if let Some((_, plural)) = F_TO_VES.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }

    // analysis -> analyses
    if let Some(stem) = word.strip_suffix("is")
        && !stem.is_empty()
    {
        return format!("{stem}es");
    }

    // box -> boxes, status -> statuses, match -> matches
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }

    // category -> categories, but day -> days
    if let Some(stem) = word.strip_suffix('y')
        && stem.chars().next_back().is_some_and(|c| !is_vowel(c))
    {
        return format!("{stem}ies");
    }

    // hero -> heroes, but photo -> photos
    if word.ends_with('o') && O_TO_OES.contains(&word) {
        return format!("{word}es");
    }

    format!("{word}s")
}
