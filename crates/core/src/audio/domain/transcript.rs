/// Recognized text for one audio buffer.
///
/// Whisper emits segment text with leading padding; the surrounding
/// whitespace is trimmed at construction so the persisted transcript is
/// exactly the recognized text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
