//! Save files

pub mod persistence;

pub use persistence::SaveGame;
