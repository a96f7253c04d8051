pub mod autocomplete_render;
pub mod autocomplete_state;

pub use autocomplete_state::AutocompleteState;

/// Whether `text` is long enough to ask for suggestions
///
/// Whitespace-only input never qualifies.
pub fn meets_min_chars(text: &str, min_chars: usize) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_chars
}
