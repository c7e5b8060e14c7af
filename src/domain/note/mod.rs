//! Note domain - user-authored annotations on characters

mod entity;
mod repository;

pub use entity::Note;
pub use repository::NoteRepository;

#[cfg(test)]
pub use repository::MockNoteRepository;
