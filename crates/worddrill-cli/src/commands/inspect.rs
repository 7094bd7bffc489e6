//! The `worddrill inspect` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use worddrill_core::ingest::{load_dataset, Ingestion};
use worddrill_core::model::{DatasetKind, Person, Record};

use super::{describe_empty, resolve_source, SourceArgs};

pub async fn execute(kind: DatasetKind, source_args: SourceArgs, limit: Option<usize>) -> Result<()> {
    let (source, _config) = resolve_source(kind, &source_args)?;
    let ingestion = load_dataset(source.as_ref(), kind).await?;

    println!("Dataset: {} ({kind})", source.name());
    print!("{}", render(&ingestion, limit));
    Ok(())
}

fn render(ingestion: &Ingestion, limit: Option<usize>) -> String {
    let report = &ingestion.report;
    let mut out = String::new();

    if ingestion.is_empty() {
        out.push_str("No usable records.\n");
        for line in describe_empty(report) {
            out.push_str(&format!("  WARNING: {line}\n"));
        }
        return out;
    }

    let shown = limit.unwrap_or(usize::MAX).min(ingestion.records.len());
    let mut table = Table::new();
    table.set_header(header(ingestion.kind));
    for record in ingestion.records.iter().take(shown) {
        table.add_row(row(record));
    }
    out.push_str(&format!("{table}\n"));

    if shown < ingestion.records.len() {
        out.push_str(&format!(
            "... {} more not shown\n",
            ingestion.records.len() - shown
        ));
    }

    for skipped in &report.skipped {
        out.push_str(&format!(
            "  [line {}] WARNING: skipped ({:?})\n",
            skipped.line, skipped.reason
        ));
    }

    out.push_str(&format!(
        "{} records from {} rows, {} skipped.\n",
        ingestion.records.len(),
        report.rows_seen,
        report.skipped.len()
    ));
    out
}

fn header(kind: DatasetKind) -> Vec<&'static str> {
    match kind {
        DatasetKind::Nouns => vec!["Sr No", "Noun", "German Word", "Article", "Gender", "Plural"],
        DatasetKind::Verbs => {
            let mut cols = vec!["Infinitive", "Meaning"];
            cols.extend(Person::ALL.iter().map(|p| p.label()));
            cols
        }
        DatasetKind::VerbPersons => vec!["Sr No", "Verb", "German Word", "Person", "Conjugation"],
    }
}

fn row(record: &Record) -> Vec<Cell> {
    match record {
        Record::Noun(n) => vec![
            Cell::new(n.sr_no),
            Cell::new(&n.noun),
            Cell::new(&n.german_word),
            Cell::new(&n.article),
            Cell::new(n.gender),
            Cell::new(&n.plural),
        ],
        Record::Verb(v) => {
            let mut cells = vec![Cell::new(&v.infinitive), Cell::new(&v.meaning)];
            cells.extend(Person::ALL.iter().map(|p| Cell::new(v.conjugation(*p))));
            cells
        }
        Record::VerbPerson(v) => vec![
            Cell::new(v.sr_no),
            Cell::new(&v.verb),
            Cell::new(&v.german_word),
            Cell::new(v.person.label()),
            Cell::new(&v.conjugation),
        ],
    }
}
