//! Drill modes and the questions they build from records.
//!
//! The session engine never looks inside a [`Record`]; it asks the active
//! [`DrillMode`] for a [`Question`] and checks answers against that.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{DatasetKind, Gender, Person, Record};
use crate::options::make_options;

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerStyle {
    Choice,
    FreeText,
}

/// The available drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrillMode {
    /// Pick the gender of a noun.
    Gender,
    /// Pick the German word for a noun among four options.
    Translation,
    /// Pick the person a conjugated form belongs to.
    Person,
    /// Type the conjugation of a verb for a given person.
    Typing,
}

impl DrillMode {
    /// The dataset this drill is built from.
    pub fn dataset_kind(&self) -> DatasetKind {
        match self {
            DrillMode::Gender | DrillMode::Translation => DatasetKind::Nouns,
            DrillMode::Person => DatasetKind::VerbPersons,
            DrillMode::Typing => DatasetKind::Verbs,
        }
    }

    pub fn style(&self) -> AnswerStyle {
        match self {
            DrillMode::Typing => AnswerStyle::FreeText,
            _ => AnswerStyle::Choice,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DrillMode::Gender => "Noun Gender Practice",
            DrillMode::Translation => "Noun Translation Practice",
            DrillMode::Person => "Verb Conjugation Practice",
            DrillMode::Typing => "Verb Typing Practice",
        }
    }

    /// Build the question for `record`. `pool` supplies distractors.
    ///
    /// A record of the wrong variant for this mode degrades to a free-text
    /// question over its generic prompt and answer.
    pub fn question<R: Rng + ?Sized>(
        &self,
        record: &Record,
        pool: &[Record],
        rng: &mut R,
    ) -> Question {
        match (self, record) {
            (DrillMode::Gender, Record::Noun(noun)) => Question {
                prompt: noun.noun.clone(),
                cue: Some(noun.german_word.clone()),
                expected: noun.gender.to_string(),
                options: Gender::ALL.iter().map(|g| g.to_string()).collect(),
                hint: None,
                note: Some(format!(
                    "{} {} is {}.",
                    noun.article, noun.german_word, noun.gender
                )),
            },
            (DrillMode::Translation, Record::Noun(noun)) => {
                let candidates = pool.iter().filter_map(|r| match r {
                    Record::Noun(n) => Some(n.german_word.as_str()),
                    _ => None,
                });
                Question {
                    prompt: noun.noun.clone(),
                    cue: None,
                    expected: noun.german_word.clone(),
                    options: make_options(&noun.german_word, candidates, rng),
                    hint: None,
                    note: join_note(&[
                        format!("{} {}", noun.article, noun.german_word),
                        plural_note(&noun.plural),
                        noun.example.clone(),
                    ]),
                }
            }
            (DrillMode::Person, Record::VerbPerson(verb)) => Question {
                prompt: verb.conjugation.clone(),
                cue: Some(format!("{} ({})", verb.german_word, verb.verb)),
                expected: verb.person.label().to_string(),
                options: Person::ALL.iter().map(|p| p.label().to_string()).collect(),
                hint: None,
                note: join_note(&[verb.example.clone()]),
            },
            (DrillMode::Typing, Record::Verb(verb)) => {
                let persons = verb.conjugated_persons();
                let person = if persons.is_empty() {
                    Person::Ich
                } else {
                    persons[rng.random_range(0..persons.len())]
                };
                Question {
                    prompt: verb.meaning.clone(),
                    cue: Some(person.label().to_string()),
                    expected: verb.conjugation(person).to_string(),
                    options: Vec::new(),
                    hint: Some(format!("The infinitive is: {}", verb.infinitive)),
                    note: join_note(&[verb.example_sentence.clone(), verb.notes.clone()]),
                }
            }
            _ => Question {
                prompt: record.prompt_text().to_string(),
                cue: None,
                expected: record.answer_text().to_string(),
                options: Vec::new(),
                hint: None,
                note: None,
            },
        }
    }
}

fn plural_note(plural: &str) -> String {
    if plural.is_empty() {
        String::new()
    } else {
        format!("Plural: {plural}")
    }
}

fn join_note(parts: &[String]) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(". "))
    }
}

impl fmt::Display for DrillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillMode::Gender => write!(f, "gender"),
            DrillMode::Translation => write!(f, "translation"),
            DrillMode::Person => write!(f, "person"),
            DrillMode::Typing => write!(f, "typing"),
        }
    }
}

impl FromStr for DrillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gender" | "genders" => Ok(DrillMode::Gender),
            "translation" | "translate" => Ok(DrillMode::Translation),
            "person" | "persons" | "conjugation" => Ok(DrillMode::Person),
            "typing" | "type" => Ok(DrillMode::Typing),
            other => Err(format!("unknown drill mode: {other}")),
        }
    }
}

/// A learner's response to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index into [`Question::options`].
    Choice(usize),
    Text(String),
}

/// One presented question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    /// Secondary prompt line (German word, person, verb).
    pub cue: Option<String>,
    pub expected: String,
    /// Ordered options; empty for free-text questions.
    pub options: Vec<String>,
    pub hint: Option<String>,
    /// Shown after answering.
    pub note: Option<String>,
}

impl Question {
    pub fn style(&self) -> AnswerStyle {
        if self.options.is_empty() {
            AnswerStyle::FreeText
        } else {
            AnswerStyle::Choice
        }
    }

    /// Judge `answer`, or `None` when it cannot be judged: an out-of-range
    /// or free-text-question choice, or blank text.
    ///
    /// Text answers to a choice question are compared against the correct
    /// option the same way free text is.
    pub fn check(&self, answer: &Answer) -> Option<bool> {
        match answer {
            Answer::Choice(idx) => self.options.get(*idx).map(|o| *o == self.expected),
            Answer::Text(text) if text.trim().is_empty() => None,
            Answer::Text(text) => Some(answers_match(text, &self.expected)),
        }
    }
}

/// Free-text equality: surrounding whitespace and case are ignored.
pub fn answers_match(candidate: &str, expected: &str) -> bool {
    candidate.trim().to_lowercase() == expected.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NounRecord, VerbConjugation, VerbPersonRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn noun(word: &str, gender: Gender) -> Record {
        Record::Noun(NounRecord {
            sr_no: 1,
            noun: format!("{word}-en"),
            german_word: word.into(),
            article: "der".into(),
            gender,
            plural: String::new(),
            example: String::new(),
        })
    }

    fn gehen() -> Record {
        Record::Verb(VerbConjugation {
            infinitive: "gehen".into(),
            meaning: "to go".into(),
            ich: "gehe".into(),
            du: "gehst".into(),
            er_sie_es: "geht".into(),
            wir: "gehen".into(),
            ihr: "geht".into(),
            sie_sie: "gehen".into(),
            past: "ging".into(),
            past_participle: "gegangen".into(),
            auxiliary: "sein".into(),
            prepositions: String::new(),
            example_sentence: "Ich gehe.".into(),
            notes: String::new(),
        })
    }

    #[test]
    fn free_text_match_ignores_case_and_whitespace() {
        assert!(answers_match("GEHE ", "gehe"));
        assert!(answers_match("gehe", "gehe"));
        assert!(answers_match("  Gehe\t", " gehe"));
        assert!(!answers_match("gehst", "gehe"));
    }

    #[test]
    fn gender_question_uses_fixed_options() {
        let mut rng = StdRng::seed_from_u64(3);
        let record = noun("Hund", Gender::Masculine);
        let q = DrillMode::Gender.question(&record, std::slice::from_ref(&record), &mut rng);
        assert_eq!(q.options, vec!["Masculine", "Feminine", "Neutral"]);
        assert_eq!(q.expected, "Masculine");
        assert_eq!(q.check(&Answer::Choice(0)), Some(true));
        assert_eq!(q.check(&Answer::Choice(2)), Some(false));
        assert_eq!(q.check(&Answer::Choice(9)), None);
        assert_eq!(q.check(&Answer::Text("masculine".into())), Some(true));
        assert_eq!(q.note.as_deref(), Some("der Hund is Masculine."));
    }

    #[test]
    fn translation_question_draws_distractors_from_pool() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool: Vec<Record> = ["Hund", "Katze", "Haus", "Baum", "Buch"]
            .into_iter()
            .map(|w| noun(w, Gender::Neutral))
            .collect();
        let q = DrillMode::Translation.question(&pool[1], &pool, &mut rng);
        assert_eq!(q.options.len(), 4);
        assert!(q.options.contains(&"Katze".to_string()));
        assert_eq!(q.expected, "Katze");
        assert_eq!(q.style(), AnswerStyle::Choice);
    }

    #[test]
    fn typing_question_picks_a_person_with_a_form() {
        let mut rng = StdRng::seed_from_u64(11);
        let record = gehen();
        let Record::Verb(verb) = &record else {
            unreachable!()
        };
        for _ in 0..20 {
            let q = DrillMode::Typing.question(&record, &[], &mut rng);
            let person = Person::normalize(q.cue.as_deref().unwrap());
            assert_eq!(q.expected, verb.conjugation(person));
            assert!(q.options.is_empty());
            assert_eq!(q.hint.as_deref(), Some("The infinitive is: gehen"));
        }
    }

    #[test]
    fn blank_text_is_not_judged() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = DrillMode::Typing.question(&gehen(), &[], &mut rng);
        assert_eq!(q.check(&Answer::Text("   ".into())), None);
        assert_eq!(q.check(&Answer::Choice(0)), None);
    }

    #[test]
    fn person_question_expects_person_label() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = Record::VerbPerson(VerbPersonRecord {
            sr_no: 4,
            verb: "to go".into(),
            german_word: "gehen".into(),
            person: Person::ErSieEs,
            conjugation: "geht".into(),
            example: String::new(),
        });
        let q = DrillMode::Person.question(&record, &[], &mut rng);
        assert_eq!(q.prompt, "geht");
        assert_eq!(q.expected, "er/sie/es");
        assert_eq!(q.check(&Answer::Choice(2)), Some(true));
        assert_eq!(q.note, None);
    }

    #[test]
    fn mismatched_record_falls_back_to_free_text() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = DrillMode::Gender.question(&gehen(), &[], &mut rng);
        assert_eq!(q.prompt, "to go");
        assert_eq!(q.expected, "gehen");
        assert_eq!(q.style(), AnswerStyle::FreeText);
    }

    #[test]
    fn mode_parse_and_dataset() {
        assert_eq!("typing".parse::<DrillMode>().unwrap(), DrillMode::Typing);
        assert_eq!(DrillMode::Person.dataset_kind(), DatasetKind::VerbPersons);
        assert!("spelling".parse::<DrillMode>().is_err());
    }
}
