//! Note infrastructure

mod sqlite;

pub use sqlite::SqliteNoteRepository;
