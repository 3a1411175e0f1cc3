use crate::client::ChatMessage;

/// Conservative estimate of token usage for a single piece of text.
fn estimate_token_count(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }

    let char_count = text.chars().count();
    let word_count = text.split_whitespace().count();

    // Use both approximations and pick the larger one to stay conservative.
    let approx_from_chars = char_count.div_ceil(3); // ~3 chars per token
    let approx_from_words = word_count;

    approx_from_chars.max(approx_from_words) as u32
}

fn estimate_message_tokens(message: &ChatMessage) -> u32 {
    let calls = message
        .tool_calls
        .iter()
        .flatten()
        .map(|call| {
            estimate_token_count(&call.function.name)
                + estimate_token_count(&call.function.arguments)
        })
        .sum::<u32>();

    // small buffer per message metadata
    estimate_token_count(message.content_str()) + calls + 4
}

/// Estimate the total tokens contributed by a sequence of chat messages.
pub fn estimate_prompt_tokens(messages: &[ChatMessage]) -> u32 {
    messages.iter().map(estimate_message_tokens).sum()
}

/// Headroom kept free for tool schemas and provider-side framing.
pub const REQUEST_COMPLETION_SAFETY_MARGIN_TOKENS: u32 = 512;

/// Floor for the completion budget; itineraries are long.
pub const MIN_COMPLETION_TOKENS: u32 = 256;

/// Largest completion the default Groq models accept in one response.
pub const MAX_COMPLETION_TOKENS: u32 = 8192;

/// Derive a completion token budget given a context limit and prepared prompt messages.
pub fn compute_completion_token_budget(max_context_tokens: u32, messages: &[ChatMessage]) -> u32 {
    let prompt_tokens = estimate_prompt_tokens(messages);
    let max_possible_completion = max_context_tokens.saturating_sub(prompt_tokens);

    if max_possible_completion == 0 {
        return 1;
    }

    let available = max_possible_completion.saturating_sub(REQUEST_COMPLETION_SAFETY_MARGIN_TOKENS);
    let desired = available.clamp(MIN_COMPLETION_TOKENS, MAX_COMPLETION_TOKENS);

    desired.min(max_possible_completion).max(1)
}
