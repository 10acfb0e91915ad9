mod client;
mod parse;

pub use client::RecommendClient;

/// One fetched pairing suggestion for a search term.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub target: String,
    pub weight: f32,
}

impl Recommendation {
    pub fn new(target: impl Into<String>, weight: f32) -> Self {
        Self {
            target: target.into(),
            weight,
        }
    }
}
