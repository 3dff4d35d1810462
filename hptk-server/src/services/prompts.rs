//! Prompt construction and option tables for the translator and drafter

use serde::Serialize;

use super::chat_client::{ChatMessage, ChatRequest};

/// Prefix the model is told to put in front of the Mandarin line
pub const TRANSLATION_MARKER: &str = "[由人工智能翻译🤖] ";

/// Drafter sampling temperature
pub const DRAFT_TEMPERATURE: f32 = 0.4;

pub const TONES: &[&str] = &[
    "Professional & polite",
    "Friendly & warm",
    "Apologetic & reassuring",
    "Spoken language (for chatting)",
    "Concise & direct",
];

pub const LANGUAGES: &[&str] = &[
    "Mandarin (Simplified Chinese)",
    "Thai",
    "Japanese",
    "Korean",
    "Vietnamese",
    "Arabic",
    "Hindi",
    "Spanish",
    "French",
    "German",
    "Mexican",
    "English (American)",
    "English (British)",
];

pub const LENGTHS: &[&str] = &["Very short", "Short", "Medium", "Long", "Very long"];

pub const DEFAULT_TONE: &str = "Concise & direct";
pub const DEFAULT_LANGUAGE: &str = "English (British)";
pub const DEFAULT_LENGTH: &str = "Short";

/// Placeholder used in place of the client message when drafting a new email
const NEW_EMAIL_PLACEHOLDER: &str = "(New email)";

/// Option lists offered by the drafter form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOptions {
    pub modes: &'static [&'static str],
    pub tones: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub lengths: &'static [&'static str],
    pub default_mode: &'static str,
    pub default_tone: &'static str,
    pub default_language: &'static str,
    pub default_length: &'static str,
}

pub fn draft_options() -> DraftOptions {
    DraftOptions {
        modes: &["reply", "new"],
        tones: TONES,
        languages: LANGUAGES,
        lengths: LENGTHS,
        default_mode: "reply",
        default_tone: DEFAULT_TONE,
        default_language: DEFAULT_LANGUAGE,
        default_length: DEFAULT_LENGTH,
    }
}

fn translation_system_prompt() -> String {
    format!(
        r#"You are a helpful interpreter that follows these rules exactly.

## You will always receive a command to translate.

## Patterns(Important!):
- If the inputs are mostly in Mandarin, translate them into English and Thai.
- If the inputs are mostly in English, translate them into Mandarin and Thai.
- If the inputs are mostly in Thai, translate them into Mandarin and English.

And you will always output only the translated version of the inputs. Don't include any instructions or summary of anything.

The translation is about background music player services.

So when you translate English to Mandarin, if it's 'player', 'player' always means 'music player' -- use 播放器 instead of 运动员 and for 'tracks' or 'track', please use 歌 or 歌曲 instead of 音轨.

## 'dialed into' means 'remotely connected to'--like a person would use TeamViewer or Splashtop to remote.

## You will always output the other 2 languages in different lines. (Please double check and make sure the translations of both languages are correct.)

For the Mandarin output, always attached this "{marker}" always in front of the output."#,
        marker = TRANSLATION_MARKER
    )
}

/// System + user messages for one translation
pub fn translation_request(text: &str) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(translation_system_prompt()),
            ChatMessage::user(format!(
                "Translate this to a spoken polite language.\nThe inputs are as follow:\n\"{}\"",
                text
            )),
        ],
        temperature: None,
    }
}

/// Inputs to the drafter prompt
#[derive(Debug, Clone, Copy)]
pub struct DraftPrompt<'a> {
    /// `Some` only when replying to a client message
    pub client_email: Option<&'a str>,
    pub instructions: &'a str,
    pub tone: &'a str,
    pub language: &'a str,
    pub length: &'a str,
}

impl DraftPrompt<'_> {
    pub fn render(&self) -> String {
        format!(
            "\nOutput Language(Very Crucial): {language}\n\
             Tone of Output Message: {tone}\n\
             Length of Output Message: {length}\n\
             \n\
             Client message:\n\
             {client}\n\
             \n\
             Instructions:\n\
             {instructions}\n\
             \n\
             Write a clear, professional, and client-ready email. Keep the language natural and \
             concise, avoiding jargon unless necessary. Do not sound defensive or overly casual.",
            language = self.language,
            tone = self.tone,
            length = self.length,
            client = self.client_email.unwrap_or(NEW_EMAIL_PLACEHOLDER),
            instructions = self.instructions,
        )
    }

    /// Single user message at the drafter temperature
    pub fn into_request(self) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(self.render())],
            temperature: Some(DRAFT_TEMPERATURE),
        }
    }
}
