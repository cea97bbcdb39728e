//! Corpus models

mod paper;

pub use paper::Paper;
