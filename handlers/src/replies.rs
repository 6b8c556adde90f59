//! User-facing reply texts.

pub const START_REPLY: &str = "👋 Hey! Send me a KukuFM link and I’ll try to fetch the audio.";
pub const RATE_LIMITED_REPLY: &str = "⏳ Please wait before making another request.";
pub const INVALID_URL_REPLY: &str = "❌ Please send a valid URL.";
pub const NO_AUDIO_REPLY: &str = "❌ Could not fetch audio.";

pub fn too_large_reply(max_file_size_mb: u64) -> String {
    format!("❌ File too large (> {}MB).", max_file_size_mb)
}

pub fn error_reply(error: &dyn std::fmt::Display) -> String {
    format!("❌ Error: {}", error)
}
