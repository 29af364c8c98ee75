//! Rule-based building blocks of salary extraction.

pub mod context;
pub mod numbers;
pub mod patterns;
pub mod period;

pub use context::{context_window, ContextWindow};
pub use numbers::{extract_numbers, is_likely_year, parse_number, NumberExtractor, SalaryCandidate};
pub use period::PeriodClassifier;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text, with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in the scanned text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Number of bytes between this match and a span; zero when they overlap.
    pub fn distance_to(&self, start: usize, end: usize) -> usize {
        match self.position {
            Some((_, e)) if e <= start => start - e,
            Some((s, _)) if end <= s => s - end,
            Some(_) => 0,
            None => usize::MAX,
        }
    }
}
