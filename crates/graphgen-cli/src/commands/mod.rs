pub mod demo;
pub mod dump;
pub mod generate;
pub mod loader;
pub mod modules;
pub mod writer;

#[cfg(test)]
mod writer_tests;
