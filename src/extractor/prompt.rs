/// The system prompt used for extracting recipes from transcripts.
///
/// It asks for one strict JSON object with `title`, `ingredients`, `steps`
/// and optional `duration` / `category`.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Build the user message carrying the transcript
pub fn build_user_message(transcript: &str) -> String {
    format!(
        "Extract the recipe from this video transcript:\n\n{}",
        transcript.trim()
    )
}
