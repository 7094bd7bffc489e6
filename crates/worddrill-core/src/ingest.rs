//! Sheet export ingestion.
//!
//! Turns raw export text into typed [`Record`]s. Ingestion is best-effort:
//! rows that cannot be decoded are skipped and reported, and a sheet whose
//! header does not resolve yields no records rather than an error.

use serde::Serialize;
use tracing::{debug, warn};

use crate::csv::{split_fields, split_lines};
use crate::error::FetchError;
use crate::model::{
    DatasetKind, Gender, NounRecord, Person, Record, VerbConjugation, VerbPersonRecord,
};
use crate::schema::{detect_kind, Field, SchemaMap};
use crate::traits::DatasetSource;

/// Why a data row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer fields than the highest required column.
    TooFewFields,
    /// Every field is empty.
    Blank,
    /// Sequence number missing, non-numeric, or zero.
    BadSequenceNumber,
    /// A field the record cannot do without is empty.
    MissingRequiredValue,
}

/// A dropped row. `line` is 1-based over non-blank lines, header = 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// What happened while ingesting one export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Data rows seen after the header.
    pub rows_seen: usize,
    pub skipped: Vec<SkippedRow>,
    /// Required columns the header did not provide.
    pub missing_columns: Vec<String>,
    /// Set when the header looks like a different dataset kind.
    pub detected_kind: Option<DatasetKind>,
}

/// Records plus the report describing how they were obtained.
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub kind: DatasetKind,
    pub records: Vec<Record>,
    pub report: IngestReport,
}

impl Ingestion {
    /// `true` when there is nothing to practice.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decode raw export text into records of `kind`.
pub fn ingest(raw: &str, kind: DatasetKind) -> Vec<Record> {
    ingest_with_report(raw, kind).records
}

/// Decode raw export text, keeping a report of skipped rows and header issues.
pub fn ingest_with_report(raw: &str, kind: DatasetKind) -> Ingestion {
    let mut lines = split_lines(raw);
    let mut report = IngestReport::default();

    let Some(header_line) = lines.next() else {
        debug!(%kind, "dataset is empty");
        return Ingestion {
            kind,
            records: Vec::new(),
            report,
        };
    };

    let headers = split_fields(header_line);
    let schema = SchemaMap::resolve(&headers, kind);

    if !schema.is_complete() {
        report.missing_columns = schema
            .missing_required()
            .iter()
            .map(|f| f.to_string())
            .collect();
        report.detected_kind = detect_kind(&headers).filter(|k| *k != kind);
        warn!(
            %kind,
            missing = ?report.missing_columns,
            detected = ?report.detected_kind,
            "missing required columns, found headers: {:?}",
            headers
        );
        return Ingestion {
            kind,
            records: Vec::new(),
            report,
        };
    }

    let mut records = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line_no = offset + 2;
        report.rows_seen += 1;
        let fields = split_fields(line);

        match decode_row(&fields, &schema) {
            Ok(record) => records.push(record),
            Err(reason) => {
                debug!(line = line_no, ?reason, "skipping row");
                report.skipped.push(SkippedRow {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    if records.is_empty() {
        warn!(%kind, rows = report.rows_seen, "no usable rows in dataset");
    } else {
        debug!(
            %kind,
            records = records.len(),
            skipped = report.skipped.len(),
            "ingested dataset"
        );
    }

    Ingestion {
        kind,
        records,
        report,
    }
}

/// Fetch a dataset from `source` and ingest it.
///
/// Only transport failures are errors; an undecodable sheet comes back as an
/// empty [`Ingestion`].
pub async fn load_dataset(
    source: &dyn DatasetSource,
    kind: DatasetKind,
) -> Result<Ingestion, FetchError> {
    let raw = source.fetch().await?;
    debug!(source = source.name(), bytes = raw.len(), "fetched dataset");
    Ok(ingest_with_report(&raw, kind))
}

/// Field access bound to one row.
struct Row<'a> {
    fields: &'a [String],
    schema: &'a SchemaMap,
}

impl Row<'_> {
    fn text(&self, field: Field) -> String {
        self.schema
            .get(field)
            .and_then(|idx| self.fields.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    fn sr_no(&self) -> Result<u32, SkipReason> {
        match parse_sequence_number(&self.text(Field::SrNo)) {
            Some(n) if n > 0 => Ok(n),
            _ => Err(SkipReason::BadSequenceNumber),
        }
    }
}

fn decode_row(fields: &[String], schema: &SchemaMap) -> Result<Record, SkipReason> {
    if fields.len() < schema.min_row_len() {
        return Err(SkipReason::TooFewFields);
    }
    if fields.iter().all(|f| f.is_empty()) {
        return Err(SkipReason::Blank);
    }

    let row = Row { fields, schema };
    match schema.kind() {
        DatasetKind::Nouns => decode_noun(&row).map(Record::Noun),
        DatasetKind::Verbs => decode_verb(&row).map(Record::Verb),
        DatasetKind::VerbPersons => decode_verb_person(&row).map(Record::VerbPerson),
    }
}

fn decode_noun(row: &Row<'_>) -> Result<NounRecord, SkipReason> {
    let sr_no = row.sr_no()?;
    let noun = row.text(Field::Noun);
    let german_word = row.text(Field::GermanWord);
    let article = row.text(Field::Article);
    let gender = row.text(Field::Gender);

    require(&[&noun, &german_word, &article, &gender])?;

    Ok(NounRecord {
        sr_no,
        noun,
        german_word,
        article,
        gender: Gender::normalize(&gender),
        plural: row.text(Field::Plural),
        example: row.text(Field::Example),
    })
}

fn decode_verb(row: &Row<'_>) -> Result<VerbConjugation, SkipReason> {
    let infinitive = row.text(Field::Infinitive);
    let meaning = row.text(Field::Meaning);
    let ich = row.text(Field::Ich);

    require(&[&infinitive, &meaning, &ich])?;

    Ok(VerbConjugation {
        infinitive,
        meaning,
        ich,
        du: row.text(Field::Du),
        er_sie_es: row.text(Field::ErSieEs),
        wir: row.text(Field::Wir),
        ihr: row.text(Field::Ihr),
        sie_sie: row.text(Field::SieSie),
        past: row.text(Field::Past),
        past_participle: row.text(Field::PastParticiple),
        auxiliary: row.text(Field::Auxiliary),
        prepositions: row.text(Field::Prepositions),
        example_sentence: row.text(Field::Example),
        notes: row.text(Field::Notes),
    })
}

fn decode_verb_person(row: &Row<'_>) -> Result<VerbPersonRecord, SkipReason> {
    let sr_no = row.sr_no()?;
    let verb = row.text(Field::Verb);
    let german_word = row.text(Field::GermanWord);
    let person = row.text(Field::Person);
    let conjugation = row.text(Field::Conjugation);

    require(&[&verb, &german_word, &person, &conjugation])?;

    Ok(VerbPersonRecord {
        sr_no,
        verb,
        german_word,
        person: Person::normalize(&person),
        conjugation,
        example: row.text(Field::Example),
    })
}

fn require(values: &[&String]) -> Result<(), SkipReason> {
    if values.iter().any(|v| v.is_empty()) {
        Err(SkipReason::MissingRequiredValue)
    } else {
        Ok(())
    }
}

/// Parse the leading decimal digits of a sequence number cell.
///
/// Trailing text is ignored (`"12a"` → 12); a cell that does not start with
/// a digit, or overflows, yields `None`.
pub fn parse_sequence_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
