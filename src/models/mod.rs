//! Data models for the library catalog

pub mod book;

pub use book::{Book, BookQuery, BookStats, CreateBook, UpdateBook};
