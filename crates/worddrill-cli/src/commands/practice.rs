//! The `worddrill practice` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;

use worddrill_core::drill::{Answer, AnswerStyle, DrillMode, Question};
use worddrill_core::error::FetchError;
use worddrill_core::report::SessionReport;
use worddrill_core::session::{PracticeSession, SessionPhase};
use worddrill_core::traits::DatasetSource;
use worddrill_sources::loader::{reload, ReloadOutcome};

use super::{describe_empty, resolve_source, SourceArgs};

pub async fn execute(
    mode: DrillMode,
    source_args: SourceArgs,
    seed: Option<u64>,
    summary: Option<PathBuf>,
) -> Result<()> {
    let (source, config) = resolve_source(mode.dataset_kind(), &source_args)?;
    let session = match seed.or(config.seed) {
        Some(seed) => PracticeSession::seeded(mode, seed),
        None => PracticeSession::new(mode),
    };
    let session = Mutex::new(session);
    let started_at = Utc::now();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let completed = run(&session, source.as_ref(), stdin.lock(), &mut stdout).await?;

    if let Some(path) = summary {
        let guard = session.lock().await;
        let report = SessionReport::new(mode, started_at, &guard.stats(), completed);
        report.save_json(&path)?;
        tracing::info!(path = %path.display(), "wrote session summary");
    }

    Ok(())
}

/// One line of learner input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Restart,
    Reload,
    Hint,
    Skip,
    /// An empty line.
    Continue,
    Response(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Input::Continue,
            "quit" | "q" | "exit" => Input::Quit,
            "restart" | "r" => Input::Restart,
            "reload" => Input::Reload,
            "hint" | "?" => Input::Hint,
            "skip" => Input::Skip,
            other => Input::Response(other),
        }
    }
}

/// Turn a response into an answer. On a choice question a number picks an
/// option (1-based); anything else is compared as text.
fn to_answer(question: &Question, response: &str) -> Answer {
    if question.style() == AnswerStyle::Choice {
        if let Ok(n) = response.parse::<usize>() {
            return Answer::Choice(n.wrapping_sub(1));
        }
    }
    Answer::Text(response.to_string())
}

/// Drive a session from `input`, loading it from `source` first.
///
/// Returns whether the session ran to completion.
pub(crate) async fn run<I: BufRead, O: Write>(
    session: &Mutex<PracticeSession>,
    source: &dyn DatasetSource,
    input: I,
    out: &mut O,
) -> Result<bool> {
    {
        let guard = session.lock().await;
        writeln!(out, "{}", guard.mode().title())?;
    }
    load(session, source, out).await?;
    if session.lock().await.phase() == SessionPhase::Empty {
        return Ok(false);
    }

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match Input::parse(&line) {
            Input::Quit => break,
            Input::Reload => {
                if let Err(e) = load(session, source, out).await {
                    writeln!(out, "Reload failed: {e:#}")?;
                    if e
                        .downcast_ref::<FetchError>()
                        .is_some_and(FetchError::is_retryable)
                    {
                        writeln!(out, "This may be temporary; type 'reload' to try again.")?;
                    }
                }
            }
            input => {
                let mut guard = session.lock().await;
                if !step(&mut guard, input, out)? {
                    break;
                }
            }
        }
    }

    let guard = session.lock().await;
    let stats = guard.stats();
    writeln!(
        out,
        "Final score: {}/{} ({}%)",
        stats.score,
        stats.total_answered,
        stats.accuracy_percent()
    )?;
    Ok(guard.is_complete())
}

/// Apply one input to the session. Returns `false` when the drill is over.
fn step<O: Write>(session: &mut PracticeSession, input: Input<'_>, out: &mut O) -> Result<bool> {
    if session.phase() == SessionPhase::Empty {
        writeln!(out, "No items to practice. Type 'reload' or 'quit'.")?;
        return Ok(true);
    }
    match input {
        Input::Quit => return Ok(false),
        Input::Reload => {}
        Input::Restart => {
            session.restart();
            render(out, session)?;
        }
        Input::Hint => match session.current().and_then(|v| v.question.hint.as_deref()) {
            Some(hint) => writeln!(out, "{hint}")?,
            None => writeln!(out, "No hint for this question.")?,
        },
        Input::Skip => match session.phase() {
            SessionPhase::InProgress | SessionPhase::Answered => {
                session.advance();
                render(out, session)?;
            }
            _ => writeln!(out, "Nothing to skip.")?,
        },
        Input::Continue => match session.phase() {
            SessionPhase::Answered => {
                session.advance();
                render(out, session)?;
            }
            SessionPhase::Complete => return Ok(false),
            _ => {}
        },
        Input::Response(text) => match session.phase() {
            SessionPhase::InProgress => answer(session, text, out)?,
            SessionPhase::Answered => writeln!(out, "(press Enter to continue)")?,
            SessionPhase::Complete => {
                writeln!(out, "Type 'restart' to go again or 'quit' to exit.")?
            }
            _ => {}
        },
    }
    Ok(true)
}

fn answer<O: Write>(session: &mut PracticeSession, text: &str, out: &mut O) -> Result<()> {
    let Some(view) = session.current() else {
        return Ok(());
    };
    let answer = to_answer(&view.question, text);
    let note = view.question.note.clone();
    let option_count = view.question.options.len();

    match session.submit_answer(answer) {
        Some(outcome) => {
            if outcome.correct {
                writeln!(out, "Correct!")?;
            } else {
                writeln!(out, "Incorrect. The answer is: {}", outcome.expected)?;
            }
            if let Some(note) = note {
                writeln!(out, "{note}")?;
            }
            let stats = session.stats();
            writeln!(
                out,
                "Score: {}/{}  Remaining: {}",
                stats.score,
                stats.total_answered,
                stats.remaining()
            )?;
            writeln!(out, "(press Enter to continue)")?;
        }
        None if option_count > 0 => writeln!(out, "Pick an option from 1 to {option_count}.")?,
        None => writeln!(out, "Type an answer, or 'skip'.")?,
    }
    Ok(())
}

async fn load<O: Write>(
    session: &Mutex<PracticeSession>,
    source: &dyn DatasetSource,
    out: &mut O,
) -> Result<()> {
    writeln!(out, "Loading {}...", source.name())?;
    match reload(session, source).await? {
        ReloadOutcome::Installed { records, report } => {
            if records == 0 {
                writeln!(out, "No items to practice.")?;
                for line in describe_empty(&report) {
                    writeln!(out, "  {line}")?;
                }
            } else {
                writeln!(out, "Loaded {records} items.")?;
                if !report.skipped.is_empty() {
                    writeln!(out, "Skipped {} unusable rows.", report.skipped.len())?;
                }
                render(out, &*session.lock().await)?;
            }
        }
        ReloadOutcome::Superseded => {}
    }
    Ok(())
}

fn render<O: Write>(out: &mut O, session: &PracticeSession) -> Result<()> {
    match session.phase() {
        SessionPhase::InProgress | SessionPhase::Answered => {
            if let Some(view) = session.current() {
                let stats = session.stats();
                writeln!(out)?;
                writeln!(
                    out,
                    "[{}/{}] {}",
                    stats.consumed, stats.pool_size, view.question.prompt
                )?;
                if let Some(cue) = &view.question.cue {
                    writeln!(out, "    {cue}")?;
                }
                for (i, option) in view.question.options.iter().enumerate() {
                    writeln!(out, "  {}) {}", i + 1, option)?;
                }
            }
        }
        SessionPhase::Complete => {
            let stats = session.stats();
            writeln!(out)?;
            writeln!(
                out,
                "Session complete! Score: {}/{} ({}%)",
                stats.score,
                stats.total_answered,
                stats.accuracy_percent()
            )?;
            writeln!(out, "Type 'restart' to go again or press Enter to finish.")?;
        }
        SessionPhase::Empty => writeln!(out, "No items to practice.")?,
        SessionPhase::Idle => {}
    }
    Ok(())
}
