use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::tokenizer::tokenize;
use crate::error::AppError;

/// Flagged term -> inclusive alternative, keyed by lowercase term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: HashMap<String, String>,
    max_span: usize,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(term, replacement)` pairs. Terms are lowercased;
    /// later pairs win over earlier ones with the same term.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (term, replacement) in pairs {
            table.insert(term.as_ref(), replacement.into());
        }
        table
    }

    fn insert(&mut self, term: &str, replacement: String) {
        let key = term.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        self.max_span = self.max_span.max(tokenize(&key).len());
        self.entries.insert(key, replacement);
    }

    /// Look up an already-lowercased term.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries.get(term).map(String::as_str)
    }

    /// Longest key, measured in tokens.
    pub fn max_span(&self) -> usize {
        self.max_span
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Owned copy of this table with `extra` terms layered on top.
    pub fn merged_with(&self, extra: &ReplacementTable) -> ReplacementTable {
        let mut merged = self.clone();
        for (term, replacement) in extra.iter() {
            merged.insert(term, replacement.to_string());
        }
        merged
    }
}

static ENGLISH: Lazy<ReplacementTable> = Lazy::new(|| {
    ReplacementTable::from_pairs([
        ("guys", "everyone"),
        ("kill", "stop"),
        ("crazy", "intense"),
        ("insane", "incredible"),
        ("man hours", "person hours"),
        ("manpower", "workforce"),
        ("chairman", "chairperson"),
        ("mailman", "mail carrier"),
        ("policeman", "police officer"),
        ("fireman", "firefighter"),
        ("stewardess", "flight attendant"),
        ("mankind", "humankind"),
        ("manned", "staffed"),
        ("master", "primary"),
        ("slave", "secondary"),
        ("blacklist", "blocklist"),
        ("whitelist", "allowlist"),
        ("blind spot", "unseen area"),
        ("grandfathered", "legacy status"),
    ])
});

static SPANISH: Lazy<ReplacementTable> = Lazy::new(|| {
    ReplacementTable::from_pairs([
        ("chicos", "todos"),
        ("matar", "detener"),
        ("loco", "intenso"),
        ("locura", "intensidad"),
        ("mano de obra", "personal"),
        ("horas hombre", "horas persona"),
        ("presidente", "presidencia"),
        ("cartero", "personal de correos"),
        ("bombero", "personal de bomberos"),
        ("azafata", "auxiliar de vuelo"),
        ("los hombres", "la humanidad"),
        ("tripulado", "operado"),
        ("maestro", "principal"),
        ("esclavo", "secundario"),
        ("lista negra", "lista de bloqueo"),
        ("lista blanca", "lista de permitidos"),
        ("punto ciego", "zona no visible"),
    ])
});

static FRENCH: Lazy<ReplacementTable> = Lazy::new(|| {
    ReplacementTable::from_pairs([
        ("les gars", "tout le monde"),
        ("tuer", "arrêter"),
        ("fou", "intense"),
        ("dingue", "incroyable"),
        ("main-d'œuvre", "effectifs"),
        ("homme-heure", "personne-heure"),
        ("président", "présidence"),
        ("facteur", "agent de distribution"),
        ("pompier", "sapeur-pompier"),
        ("hôtesse de l'air", "personnel navigant"),
        ("maître", "principal"),
        ("esclave", "secondaire"),
        ("liste noire", "liste de blocage"),
        ("liste blanche", "liste d'autorisation"),
        ("angle mort", "zone non visible"),
    ])
});

/// Language variant selecting a replacement table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
        }
    }

    pub fn table(self) -> &'static ReplacementTable {
        match self {
            Language::En => &ENGLISH,
            Language::Es => &SPANISH,
            Language::Fr => &FRENCH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted || lang.name().to_lowercase() == wanted)
            .ok_or_else(|| AppError::Config(format!("unsupported language: {}", s)))
    }
}
