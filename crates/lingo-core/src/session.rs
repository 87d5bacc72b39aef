//! The interactive session: one login attempt, then a command loop over
//! `add`, `view` and `quiz` until input ends.

use std::io::{self, BufRead, Write};

use rand::Rng;

use crate::auth::CredentialVerifier;
use crate::catalog::{add_word_interactive, CatalogError};
use crate::console::Console;
use crate::quiz::{run_quiz, QuizError};
use crate::store::Store;
use crate::viewer::{view_interactive, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    View,
    Quiz,
}

impl Command {
    /// Exactly `add`, `view` or `quiz`; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "add" => Some(Self::Add),
            "view" => Some(Self::View),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

/// Ask for username and password once. Returns the username on success.
pub fn authenticate<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    verifier: &dyn CredentialVerifier,
) -> io::Result<Option<String>> {
    let Some(username) = console.prompt("Enter your username: ")? else {
        return Ok(None);
    };
    let Some(password) = console.prompt("Enter your password: ")? else {
        return Ok(None);
    };
    if verifier.verify(&username, &password) {
        console.say("Authentication successful!")?;
        log::info!("{} logged in", username);
        Ok(Some(username))
    } else {
        console.say("Authentication failed. Please try again.")?;
        log::info!("failed login for {:?}", username);
        Ok(None)
    }
}

/// Authenticate, then serve commands until end of input.
/// Returns the number of commands run, or `None` if authentication failed.
pub fn run_session<R: BufRead, W: Write, G: Rng + ?Sized>(
    store: &Store,
    console: &mut Console<R, W>,
    verifier: &dyn CredentialVerifier,
    rng: &mut G,
) -> Result<Option<usize>, SessionError> {
    let Some(owner) = authenticate(console, verifier)? else {
        return Ok(None);
    };

    let mut commands = 0;
    while let Some(input) = console.prompt("Enter a command (add, view, quiz): ")? {
        let Some(command) = Command::parse(&input) else {
            console.say("Invalid command. Try again.")?;
            continue;
        };
        match command {
            Command::Add => {
                add_word_interactive(store, console, &owner)?;
            }
            Command::View => {
                view_interactive(store, console, &owner, None)?;
            }
            Command::Quiz => {
                run_quiz(store, console, &owner, rng)?;
            }
        }
        commands += 1;
    }
    log::debug!("session for {} ended after {} commands", owner, commands);
    Ok(Some(commands))
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::auth::StaticCredentials;
    use crate::console::testing::{printed, scripted};

    struct DenyAll;

    impl CredentialVerifier for DenyAll {
        fn verify(&self, _username: &str, _password: &str) -> bool {
            false
        }
    }

    fn run(store: &Store, lines: &[&str]) -> (Option<usize>, String) {
        let mut console = scripted(lines);
        let mut rng = StdRng::seed_from_u64(1);
        let result = run_session(store, &mut console, &StaticCredentials::default(), &mut rng).unwrap();
        (result, printed(&console))
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("add"), Some(Command::Add));
        assert_eq!(Command::parse(" view\t"), Some(Command::View));
        assert_eq!(Command::parse("quiz"), Some(Command::Quiz));
        assert_eq!(Command::parse("ADD"), None);
        assert_eq!(Command::parse("exit"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn failed_login_ends_session() {
        let store = Store::open_in_memory().unwrap();
        let (result, out) = run(&store, &["matt", "wrong", "add"]);
        assert_eq!(result, None);
        assert!(out.ends_with("Authentication failed. Please try again.\n"));
        assert!(!out.contains("Enter a command"));
    }

    #[test]
    fn verifier_is_injectable() {
        let store = Store::open_in_memory().unwrap();
        let mut console = scripted(&["matt", "matt"]);
        let mut rng = StdRng::seed_from_u64(1);
        let result = run_session(&store, &mut console, &DenyAll, &mut rng).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn add_view_quiz_session() {
        let store = Store::open_in_memory().unwrap();
        let (result, out) = run(
            &store,
            &[
                "matt", "matt",
                "help",
                "add", "perro", "dog", "1",
                "view", "all",
                "quiz", "DOG", "no", "no",
            ],
        );
        assert_eq!(result, Some(3));
        assert!(out.contains("Authentication successful!\n"));
        assert!(out.contains("Invalid command. Try again.\n"));
        assert!(out.contains("Category: Outdoors\n"));
        assert!(out.contains("Total Words: 1\n"));
        assert!(out.contains("Correct Answers: 1\n"));
        assert_eq!(store.word_count("matt").unwrap(), 1);
    }

    #[test]
    fn quiz_without_words_returns_to_prompt() {
        let store = Store::open_in_memory().unwrap();
        store.add_word("user2", "gato", "cat", None).unwrap();
        let (result, out) = run(&store, &["matt", "matt", "quiz", "view", "all"]);
        assert_eq!(result, Some(2));
        assert!(out.contains("You don't have any words to quiz."));
        assert!(out.contains("Total Words: 0\n"));
        assert!(!out.contains("gato"));
    }
}
