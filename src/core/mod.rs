pub mod config;
pub mod word_dictionary;
