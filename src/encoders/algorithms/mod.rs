pub mod bit_reader;
pub mod bit_writer;
pub mod errors;
pub mod run_length;
pub mod word;
