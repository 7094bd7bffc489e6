//! Header schema resolution.
//!
//! Sheet headers are edited by hand and drift ("Sr No", "Sr No.", "SrNo",
//! "German Word "). Each dataset kind carries an ordered rule table of
//! (canonical field, matcher) pairs; resolving a header row walks the table
//! once and yields an immutable field → column mapping.

use std::collections::HashMap;
use std::fmt;

use crate::model::DatasetKind;

/// Canonical column identities across all sheet layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SrNo,
    Noun,
    GermanWord,
    Article,
    Gender,
    Plural,
    Example,
    Infinitive,
    Meaning,
    Ich,
    Du,
    ErSieEs,
    Wir,
    Ihr,
    SieSie,
    Past,
    PastParticiple,
    Auxiliary,
    Prepositions,
    Notes,
    Verb,
    Person,
    Conjugation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::SrNo => "sr no",
            Field::Noun => "noun",
            Field::GermanWord => "german word",
            Field::Article => "article",
            Field::Gender => "gender",
            Field::Plural => "plural",
            Field::Example => "example",
            Field::Infinitive => "infinitive",
            Field::Meaning => "meaning",
            Field::Ich => "ich",
            Field::Du => "du",
            Field::ErSieEs => "er/sie/es",
            Field::Wir => "wir",
            Field::Ihr => "ihr",
            Field::SieSie => "sie/Sie",
            Field::Past => "past",
            Field::PastParticiple => "past participle",
            Field::Auxiliary => "auxiliary",
            Field::Prepositions => "prepositions",
            Field::Notes => "notes",
            Field::Verb => "verb",
            Field::Person => "person",
            Field::Conjugation => "conjugation",
        };
        f.write_str(name)
    }
}

/// A header cell prepared for matching.
#[derive(Debug, Clone)]
pub struct HeaderText {
    /// Trimmed, unquoted, lowercased.
    pub lower: String,
    /// `lower` with everything but letters and digits removed.
    pub compact: String,
}

impl HeaderText {
    pub fn new(raw: &str) -> Self {
        let lower = raw.trim().trim_matches('"').trim().to_lowercase();
        let compact = lower.chars().filter(|c| c.is_alphanumeric()).collect();
        Self { lower, compact }
    }

    fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    fn is(&self, compact: &str) -> bool {
        self.compact == compact
    }
}

/// One entry of a resolution table.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    pub matches: fn(&HeaderText) -> bool,
}

fn sr_no(h: &HeaderText) -> bool {
    h.compact.starts_with("srno") || h.is("serialno") || h.is("serialnumber")
}

fn german_word(h: &HeaderText) -> bool {
    h.contains("german") && h.contains("word")
}

fn example(h: &HeaderText) -> bool {
    h.is("example") || (h.contains("example") && h.contains("sentence"))
}

fn er_sie_es(h: &HeaderText) -> bool {
    h.is("ersiees") || h.contains("er/sie") || h.contains("er sie")
}

fn sie_sie(h: &HeaderText) -> bool {
    h.is("siesie") || h.contains("sie")
}

fn past(h: &HeaderText) -> bool {
    h.contains("präteritum") || (h.contains("past") && !h.contains("participle"))
}

fn past_participle(h: &HeaderText) -> bool {
    h.contains("participle") && !h.contains("präteritum")
}

const fn rule(field: Field, required: bool, matches: fn(&HeaderText) -> bool) -> FieldRule {
    FieldRule {
        field,
        required,
        matches,
    }
}

const NOUN_RULES: &[FieldRule] = &[
    rule(Field::SrNo, true, sr_no),
    rule(Field::Noun, true, |h| h.is("noun")),
    rule(Field::GermanWord, true, german_word),
    rule(Field::Article, true, |h| h.is("article")),
    rule(Field::Gender, true, |h| h.is("gender")),
    rule(Field::Plural, false, |h| h.is("plural")),
    rule(Field::Example, false, example),
];

// ErSieEs precedes SieSie: a column is claimed by the first rule matching it.
const VERB_RULES: &[FieldRule] = &[
    rule(Field::Infinitive, true, |h| h.is("infinitive")),
    rule(Field::Meaning, true, |h| h.is("meaning")),
    rule(Field::Ich, true, |h| h.is("ich")),
    rule(Field::Du, false, |h| h.is("du")),
    rule(Field::ErSieEs, false, er_sie_es),
    rule(Field::Wir, false, |h| h.is("wir")),
    rule(Field::Ihr, false, |h| h.is("ihr")),
    rule(Field::SieSie, false, sie_sie),
    rule(Field::PastParticiple, false, past_participle),
    rule(Field::Past, false, past),
    rule(Field::Auxiliary, false, |h| h.is("auxiliary")),
    rule(Field::Prepositions, false, |h| {
        h.is("prepositions") || h.is("preposition")
    }),
    rule(Field::Example, false, example),
    rule(Field::Notes, false, |h| h.is("notes") || h.is("note")),
];

const VERB_PERSON_RULES: &[FieldRule] = &[
    rule(Field::SrNo, true, sr_no),
    rule(Field::Verb, true, |h| h.is("verb")),
    rule(Field::GermanWord, true, german_word),
    rule(Field::Person, true, |h| h.is("person")),
    rule(Field::Conjugation, true, |h| h.is("conjugation")),
    rule(Field::Example, false, example),
];

/// The resolution table for a dataset kind.
pub fn rules_for(kind: DatasetKind) -> &'static [FieldRule] {
    match kind {
        DatasetKind::Nouns => NOUN_RULES,
        DatasetKind::Verbs => VERB_RULES,
        DatasetKind::VerbPersons => VERB_PERSON_RULES,
    }
}

/// Resolved field → column mapping for one header row.
#[derive(Debug, Clone)]
pub struct SchemaMap {
    kind: DatasetKind,
    columns: HashMap<Field, usize>,
    missing: Vec<Field>,
    min_row_len: usize,
}

impl SchemaMap {
    /// Resolve a header row against the rule table of `kind`.
    pub fn resolve<S: AsRef<str>>(headers: &[S], kind: DatasetKind) -> Self {
        let headers: Vec<HeaderText> = headers.iter().map(|h| HeaderText::new(h.as_ref())).collect();
        let mut claimed = vec![false; headers.len()];
        let mut columns = HashMap::new();
        let mut missing = Vec::new();

        for rule in rules_for(kind) {
            let found = headers
                .iter()
                .enumerate()
                .find(|(idx, h)| !claimed[*idx] && (rule.matches)(h))
                .map(|(idx, _)| idx);

            match found {
                Some(idx) => {
                    claimed[idx] = true;
                    columns.insert(rule.field, idx);
                }
                None if rule.required => missing.push(rule.field),
                None => {}
            }
        }

        let min_row_len = rules_for(kind)
            .iter()
            .filter(|r| r.required)
            .filter_map(|r| columns.get(&r.field))
            .max()
            .map_or(0, |idx| idx + 1);

        Self {
            kind,
            columns,
            missing,
            min_row_len,
        }
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    /// Column index of `field`, if the header row has one.
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Required fields no header matched.
    pub fn missing_required(&self) -> &[Field] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Rows shorter than this cannot hold every required column.
    pub fn min_row_len(&self) -> usize {
        self.min_row_len
    }
}

/// Guess which dataset kind a header row belongs to.
pub fn detect_kind<S: AsRef<str>>(headers: &[S]) -> Option<DatasetKind> {
    [
        DatasetKind::Nouns,
        DatasetKind::Verbs,
        DatasetKind::VerbPersons,
    ]
    .into_iter()
    .find(|kind| SchemaMap::resolve(headers, *kind).is_complete())
}
