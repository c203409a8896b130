//! Recover a JSON payload from loosely formatted model output.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Opening fence with optional `json` language tag, at the very start.
    static ref OPEN_FENCE: Regex = Regex::new(r"\A```(?:json)?[ \t]*\r?\n?").unwrap();

    // Closing fence at the very end.
    static ref CLOSE_FENCE: Regex = Regex::new(r"\r?\n?[ \t]*```\z").unwrap();
}

/// Strip a surrounding markdown code fence from a completion.
///
/// Matches fence boundaries instead of stripping backtick or `json`
/// characters, so payloads whose content contains the substring `json` or
/// interior backticks are left intact. Stripping repeats until a fixpoint
/// is reached, which makes the operation idempotent. Input without a
/// leading fence is returned trimmed.
pub fn sanitize_completion(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = strip_fence_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_fence_once(text: &str) -> String {
    if !text.starts_with("```") {
        return text.trim().to_string();
    }
    let without_open = OPEN_FENCE.replace(text, "");
    let without_close = CLOSE_FENCE.replace(&without_open, "");
    without_close.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fenced_json_yields_bare_payload() {
        let raw = "```json\n{\"amount\": 23.5}\n```";
        assert_eq!(sanitize_completion(raw), "{\"amount\": 23.5}");
    }

    #[test]
    fn fence_without_language_tag() {
        let raw = "```\n{\"amount\": 23.5}\n```";
        assert_eq!(sanitize_completion(raw), "{\"amount\": 23.5}");
    }

    #[test]
    fn unfenced_input_is_only_trimmed() {
        assert_eq!(sanitize_completion("  {\"a\": 1}\n"), "{\"a\": 1}");
        assert_eq!(sanitize_completion("Sorry, I cannot process this."),
                   "Sorry, I cannot process this.");
    }

    #[test]
    fn payload_containing_json_substring_is_preserved() {
        let raw = "```json\n{\"title\": \"json cafe\", \"note\": \"a ` mark\"}\n```";
        assert_eq!(
            sanitize_completion(raw),
            "{\"title\": \"json cafe\", \"note\": \"a ` mark\"}"
        );
    }

    #[test]
    fn leading_fence_without_closing_is_stripped() {
        let raw = "```json\n{\"a\": 1}";
        assert_eq!(sanitize_completion(raw), "{\"a\": 1}");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "```json\n{\"a\": 1}\n```",
            "```\n```json\n{\"a\": 1}\n```\n```",
            "{\"a\": 1}",
            "  plain text  ",
            "```",
            "",
        ];
        for input in inputs {
            let once = sanitize_completion(input);
            let twice = sanitize_completion(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_completion(""), "");
        assert_eq!(sanitize_completion("   \n  "), "");
    }
}
