pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_TOKENS: u32 = 32768;
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_SEARCH_RESULTS: u32 = 10;
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 5;

pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const SERP_API_KEY_ENV: &str = "SERP_API_KEY";
