//! Caption composition from stored prompts.

/// Platform limit on caption length, in characters.
pub const MAX_CAPTION_CHARS: usize = 280;

const FALLBACK_CAPTION: &str = "A freshly generated image.";

/// Compose a post caption from an image prompt.
///
/// Whitespace is trimmed, an empty prompt falls back to a stock line, and
/// prompts beyond [`MAX_CAPTION_CHARS`] are cut at a character boundary with
/// a trailing ellipsis.
///
/// # Examples
///
/// ```
/// use gallerist_social::compose_caption;
///
/// assert_eq!(compose_caption("  a sunset  "), "a sunset");
/// ```
pub fn compose_caption(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return FALLBACK_CAPTION.to_string();
    }
    if trimmed.chars().count() <= MAX_CAPTION_CHARS {
        return trimmed.to_string();
    }
    let mut caption: String = trimmed.chars().take(MAX_CAPTION_CHARS - 1).collect();
    caption.push('…');
    caption
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompts_pass_through_trimmed() {
        assert_eq!(compose_caption("a sunset over the sea"), "a sunset over the sea");
        assert_eq!(compose_caption("\n  a sunset \t"), "a sunset");
    }

    #[test]
    fn empty_prompt_uses_the_fallback() {
        assert_eq!(compose_caption(""), FALLBACK_CAPTION);
        assert_eq!(compose_caption("   "), FALLBACK_CAPTION);
    }

    #[test]
    fn long_prompts_are_truncated_with_an_ellipsis() {
        let prompt = "x".repeat(400);
        let caption = compose_caption(&prompt);
        assert_eq!(caption.chars().count(), MAX_CAPTION_CHARS);
        assert!(caption.ends_with('…'));
    }

    #[test]
    fn truncation_respects_character_boundaries() {
        // Multi-byte characters must not be split.
        let prompt = "é".repeat(300);
        let caption = compose_caption(&prompt);
        assert_eq!(caption.chars().count(), MAX_CAPTION_CHARS);
    }

    #[test]
    fn prompt_at_the_limit_is_untouched() {
        let prompt = "y".repeat(MAX_CAPTION_CHARS);
        assert_eq!(compose_caption(&prompt), prompt);
    }
}
