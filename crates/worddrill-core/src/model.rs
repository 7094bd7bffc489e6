//! Core data model types for worddrill.
//!
//! These are the typed records produced by ingestion and consumed by the
//! practice session engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grammatical gender of a noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
    Neutral,
}

impl Gender {
    /// All genders in display order.
    pub const ALL: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::Neutral];

    /// Normalize free sheet text to a gender by keyword.
    ///
    /// Unrecognized text falls back to [`Gender::Neutral`].
    pub fn normalize(raw: &str) -> Gender {
        let lower = raw.trim().to_lowercase();
        if lower.contains("masculine") {
            Gender::Masculine
        } else if lower.contains("feminine") {
            Gender::Feminine
        } else {
            Gender::Neutral
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Masculine => write!(f, "Masculine"),
            Gender::Feminine => write!(f, "Feminine"),
            Gender::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Grammatical person of a conjugated verb form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    Ich,
    Du,
    ErSieEs,
    Wir,
    Ihr,
    SieSie,
}

/// Word table for [`Person::normalize`], matched against the alphabetic
/// tokens of a cell. Order matters: `er/sie/es` contains `sie`, so the third
/// person singular is tested before the plural/formal form.
const PERSON_KEYWORDS: &[(Person, &[&str])] = &[
    (Person::ErSieEs, &["er", "es", "he", "she"]),
    (Person::Ihr, &["ihr"]),
    (Person::Wir, &["wir", "we"]),
    (Person::Du, &["du"]),
    (Person::Ich, &["ich"]),
    (Person::SieSie, &["sie", "they"]),
];

impl Person {
    /// All persons in conjugation-table order.
    pub const ALL: [Person; 6] = [
        Person::Ich,
        Person::Du,
        Person::ErSieEs,
        Person::Wir,
        Person::Ihr,
        Person::SieSie,
    ];

    /// The person's label as it appears in conjugation tables.
    pub fn label(&self) -> &'static str {
        match self {
            Person::Ich => "ich",
            Person::Du => "du",
            Person::ErSieEs => "er/sie/es",
            Person::Wir => "wir",
            Person::Ihr => "ihr",
            Person::SieSie => "sie/Sie",
        }
    }

    /// Normalize free sheet text to a person by keyword.
    ///
    /// Spacing and punctuation are ignored (`er / sie / es`, `ErSieEs`), a
    /// bare `er` or `es` is the third person singular, and a bare `sie` is
    /// read as the plural/formal form. Unrecognized text falls back to
    /// [`Person::Ich`].
    pub fn normalize(raw: &str) -> Person {
        let lower = raw.trim().to_lowercase();
        let compact: String = lower.chars().filter(|c| c.is_alphabetic()).collect();
        if compact.starts_with("ersie") {
            return Person::ErSieEs;
        }
        if compact == "siesie" {
            return Person::SieSie;
        }

        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| !t.is_empty())
            .collect();
        for (person, keywords) in PERSON_KEYWORDS {
            if tokens.iter().any(|t| keywords.contains(t)) {
                return *person;
            }
        }
        Person::Ich
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which sheet layout a dataset follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// Noun sheet (gender, translation).
    Nouns,
    /// Verb conjugation table, one row per verb.
    Verbs,
    /// Verb sheet with one row per (verb, person) pair.
    VerbPersons,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Nouns => write!(f, "nouns"),
            DatasetKind::Verbs => write!(f, "verbs"),
            DatasetKind::VerbPersons => write!(f, "verb-persons"),
        }
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nouns" | "noun" => Ok(DatasetKind::Nouns),
            "verbs" | "verb" | "conjugations" => Ok(DatasetKind::Verbs),
            "verb-persons" | "verb_persons" | "persons" => Ok(DatasetKind::VerbPersons),
            other => Err(format!("unknown dataset kind: {other}")),
        }
    }
}

/// One row of the noun sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounRecord {
    /// Sequence number from the sheet. Not guaranteed unique.
    pub sr_no: u32,
    /// The noun in the learner's language.
    pub noun: String,
    /// The German word, without article.
    pub german_word: String,
    /// The definite article (der, die, das).
    pub article: String,
    pub gender: Gender,
    #[serde(default)]
    pub plural: String,
    #[serde(default)]
    pub example: String,
}

/// One row of the verb conjugation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbConjugation {
    pub infinitive: String,
    pub meaning: String,
    pub ich: String,
    #[serde(default)]
    pub du: String,
    #[serde(default)]
    pub er_sie_es: String,
    #[serde(default)]
    pub wir: String,
    #[serde(default)]
    pub ihr: String,
    #[serde(default)]
    pub sie_sie: String,
    /// Präteritum.
    #[serde(default)]
    pub past: String,
    #[serde(default)]
    pub past_participle: String,
    #[serde(default)]
    pub auxiliary: String,
    #[serde(default)]
    pub prepositions: String,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub notes: String,
}

impl VerbConjugation {
    /// The conjugated form for `person`; empty when the sheet has none.
    pub fn conjugation(&self, person: Person) -> &str {
        match person {
            Person::Ich => &self.ich,
            Person::Du => &self.du,
            Person::ErSieEs => &self.er_sie_es,
            Person::Wir => &self.wir,
            Person::Ihr => &self.ihr,
            Person::SieSie => &self.sie_sie,
        }
    }

    /// Persons whose conjugation is present, in table order.
    pub fn conjugated_persons(&self) -> Vec<Person> {
        Person::ALL
            .into_iter()
            .filter(|p| !self.conjugation(*p).is_empty())
            .collect()
    }
}

/// One row of the per-person verb sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPersonRecord {
    pub sr_no: u32,
    /// The verb in the learner's language.
    pub verb: String,
    /// The German infinitive.
    pub german_word: String,
    pub person: Person,
    pub conjugation: String,
    #[serde(default)]
    pub example: String,
}

/// A decoded dataset row.
///
/// The variant is fixed for a whole dataset by its [`DatasetKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Record {
    Noun(NounRecord),
    Verb(VerbConjugation),
    VerbPerson(VerbPersonRecord),
}

impl Record {
    /// Generic prompt text, independent of drill mode.
    pub fn prompt_text(&self) -> &str {
        match self {
            Record::Noun(n) => &n.noun,
            Record::Verb(v) => &v.meaning,
            Record::VerbPerson(v) => &v.conjugation,
        }
    }

    /// Generic expected answer, independent of drill mode.
    pub fn answer_text(&self) -> &str {
        match self {
            Record::Noun(n) => &n.german_word,
            Record::Verb(v) => &v.infinitive,
            Record::VerbPerson(v) => v.person.label(),
        }
    }
}
