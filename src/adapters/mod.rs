pub mod constraints;
pub mod document;
pub mod encoder;
pub mod generator;
pub mod normalizer;
pub mod pattern;
pub mod primitive;
pub mod sample_cache;
pub mod sanitize;
pub mod xml_writer;

#[cfg(test)]
mod normalizer_test;
#[cfg(test)]
mod sample_cache_test;
#[cfg(test)]
mod xml_test;
