//! Recall quiz: every word of the owner in random order, Spanish shown,
//! English typed back. Results live only for the round.

use std::io::{self, BufRead, Write};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::console::Console;
use crate::store::{Store, StoreError, Word};

/// A word answered incorrectly, with the answer that was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missed {
    pub spanish: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect { expected: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizReport {
    pub correct: usize,
    pub incorrect: usize,
    /// In the order they were missed.
    pub missed: Vec<Missed>,
}

impl QuizReport {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Case-insensitive comparison; otherwise the answer must match exactly.
pub fn is_correct(expected: &str, given: &str) -> bool {
    given.to_lowercase() == expected.to_lowercase()
}

/// One quiz round over a shuffled word list.
#[derive(Debug, Clone)]
pub struct Quiz {
    words: Vec<Word>,
    next: usize,
    report: QuizReport,
}

impl Quiz {
    /// Shuffle `words` into a new round. `None` when there is nothing to ask.
    pub fn new<G: Rng + ?Sized>(mut words: Vec<Word>, rng: &mut G) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        words.shuffle(rng);
        Some(Self {
            words,
            next: 0,
            report: QuizReport::default(),
        })
    }

    /// Fetch every word of `owner` and start a round over them.
    pub fn load<G: Rng + ?Sized>(
        store: &Store,
        owner: &str,
        rng: &mut G,
    ) -> Result<Option<Self>, StoreError> {
        Ok(Self::new(store.words(owner)?, rng))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in the order they are asked.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The word waiting for an answer, if any.
    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.next)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.words.len()
    }

    /// Score `given` against the current word and move on.
    /// Returns `None` once every word has been asked.
    pub fn answer(&mut self, given: &str) -> Option<Verdict> {
        let word = self.words.get(self.next)?;
        self.next += 1;
        if is_correct(&word.english, given) {
            self.report.correct += 1;
            Some(Verdict::Correct)
        } else {
            self.report.incorrect += 1;
            self.report.missed.push(Missed {
                spanish: word.spanish.clone(),
                english: word.english.clone(),
            });
            Some(Verdict::Incorrect {
                expected: word.english.clone(),
            })
        }
    }

    pub fn report(&self) -> &QuizReport {
        &self.report
    }

    pub fn into_report(self) -> QuizReport {
        self.report
    }
}

/// Interactive quiz. Each round reloads the owner's full word set; after the
/// results the user may review missed words and start another round.
/// Returns the report of every round that ran to completion.
pub fn run_quiz<R: BufRead, W: Write, G: Rng + ?Sized>(
    store: &Store,
    console: &mut Console<R, W>,
    owner: &str,
    rng: &mut G,
) -> Result<Vec<QuizReport>, QuizError> {
    let mut rounds = Vec::new();
    loop {
        let Some(mut quiz) = Quiz::load(store, owner, rng)? else {
            console.say("You don't have any words to quiz. Add some words first!")?;
            return Ok(rounds);
        };
        log::debug!("quiz round {} for {}: {} words", rounds.len() + 1, owner, quiz.len());

        while let Some(word) = quiz.current() {
            let spanish = word.spanish.clone();
            console.say("")?;
            console.say(format!("Word in Spanish: {}", spanish))?;
            let Some(given) = console.prompt("   English: ")? else {
                return Ok(rounds);
            };
            match quiz.answer(&given) {
                Some(Verdict::Correct) => console.say("Correct!\n")?,
                Some(Verdict::Incorrect { expected }) => {
                    console.say(format!("Incorrect. The correct answer is {}.\n", expected))?
                }
                None => break,
            }
        }

        let report = quiz.into_report();
        print_results(console, &report)?;
        if console.confirm("Do you want to view wrong answers?")? {
            print_missed(console, &report.missed)?;
        }
        rounds.push(report);

        if !console.confirm("Do you want to retake the quiz?")? {
            return Ok(rounds);
        }
    }
}

fn print_results<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    report: &QuizReport,
) -> io::Result<()> {
    console.say("")?;
    console.say("Quiz Results:")?;
    console.say(format!("Correct Answers: {}", report.correct))?;
    console.say(format!("Incorrect Answers: {}", report.incorrect))
}

fn print_missed<R: BufRead, W: Write>(console: &mut Console<R, W>, missed: &[Missed]) -> io::Result<()> {
    console.say("")?;
    console.say("Wrong Answers:")?;
    for m in missed {
        console.say("")?;
        console.say(format!("Word in Spanish: {}", m.spanish))?;
        console.say(format!("   Correct Answer: {}", m.english))?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}
