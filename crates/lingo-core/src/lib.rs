//! All backend logic independent of how the app is run.
//!
//! Words and categories live in a SQLite file (see [store]); Lingo keeps its
//! config and default database in its own app data directory (see [app_data]).

pub mod app_data;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod console;
pub mod quiz;
pub mod session;
pub mod store;
pub mod viewer;

pub use app_data::{app_data_dir, default_db_path};
pub use auth::{CredentialVerifier, StaticCredentials};
pub use catalog::{add_category, list_categories, CatalogError, CategoryChoice};
pub use config::{get_db_path, load_config, set_db_path, Config, ConfigError};
pub use console::Console;
pub use quiz::{run_quiz, Quiz, QuizReport, Verdict};
pub use session::{run_session, Command, SessionError};
pub use store::{Category, Store, StoreError, Word, DEFAULT_CATEGORIES};
pub use viewer::{view, Listing, ViewSelection};
