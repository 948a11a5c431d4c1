use crate::error::TranscriptError;
use crate::model::Transcript;
use async_trait::async_trait;
use log::debug;

/// Sample spoken transcript used until real video transcription is wired in
pub const SAMPLE_TRANSCRIPT: &str = "\
Hey guys! Today I'm making my favorite pasta carbonara.
You'll need 400 grams of spaghetti, 200 grams of pancetta,
4 eggs, and 100 grams of Pecorino Romano cheese.
Also black pepper and salt.

First, boil salted water and cook the spaghetti.
While that's cooking, cut the pancetta into small cubes and fry until crispy.
In a bowl, whisk the eggs with grated cheese.
Save a cup of pasta water before draining.
Take the pan off the heat, add the pasta to the pancetta,
then quickly mix in the egg mixture with some pasta water to make it creamy.
Add pepper and serve! This takes about 20 minutes total.
";

/// Source of spoken text for a video
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn get_transcript(&self, video_url: &str) -> Result<Transcript, TranscriptError>;
}

/// Returns the same transcript for every video
pub struct StaticTranscriptProvider {
    text: String,
}

impl StaticTranscriptProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Provider for `text` if one is configured, else the built-in sample
    pub fn from_config(text: Option<&str>) -> Self {
        Self::new(text.unwrap_or(SAMPLE_TRANSCRIPT))
    }
}

impl Default for StaticTranscriptProvider {
    fn default() -> Self {
        Self::new(SAMPLE_TRANSCRIPT)
    }
}

#[async_trait]
impl TranscriptProvider for StaticTranscriptProvider {
    async fn get_transcript(&self, video_url: &str) -> Result<Transcript, TranscriptError> {
        debug!("Using static transcript for {}", video_url);
        if self.text.trim().is_empty() {
            return Err(TranscriptError::Empty);
        }
        Ok(Transcript::new(self.text.clone()))
    }
}
