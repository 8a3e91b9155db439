pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_CEREBRAS_BASE_URL: &str = "https://api.cerebras.ai/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_SECS: u64 = 5;
pub const DEFAULT_TRANSCRIPT_SAMPLE_CHARS: usize = 15_000;
pub const DEFAULT_SESSION_ID: &str = "pod_001";

pub const DEFAULT_RECORDINGS_DIR: &str = "podcast_recordings";
pub const DEFAULT_TRANSCRIPTS_DIR: &str = "test_data";

pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
