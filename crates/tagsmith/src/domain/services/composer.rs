//! Prompt Composer
//!
//! Assembles the instruction string handed to the inference backend from
//! the target language and the applicable rule texts. Rules are rendered
//! as `- <rule>` lines after the built-in rules, in the order given.
//!
//! ## Context length
//!
//! Text prompts are composed against an advisory token budget. Token counts
//! are estimated at four bytes per token. The built-in instructions are always
//! kept. Rules are admitted in order while the prompt still fits the budget;
//! the first rule that does not fit and every rule after it are omitted, so a
//! later rule never displaces an earlier one. Content is never truncated here:
//! the placeholder marks where the caller substitutes it, and
//! [`TextPrompt::fill`] is the explicit helper for doing so.

const CHARS_PER_TOKEN: usize = 4;

/// Rough token estimate (~4 bytes per token)
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(CHARS_PER_TOKEN)
}

/// A composed text prompt together with the budget decisions behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub prompt: String,
    /// Leading rules that made it into the prompt
    pub included_rules: usize,
    /// Trailing rules dropped to respect the context length
    pub omitted_rules: usize,
    /// Estimated tokens left for the content substituted at the placeholder
    pub content_budget: usize,
    placeholder_at: usize,
    placeholder_len: usize,
}

impl TextPrompt {
    /// Substitute `content` for the placeholder, cut to `content_budget`
    pub fn fill(&self, content: &str) -> String {
        let content = truncate_to_tokens(content, self.content_budget);
        let tail = &self.prompt[self.placeholder_at + self.placeholder_len..];

        let mut filled =
            String::with_capacity(self.placeholder_at + content.len() + tail.len());
        filled.push_str(&self.prompt[..self.placeholder_at]);
        filled.push_str(content);
        filled.push_str(tail);
        filled
    }
}

/// Build the text tagging prompt
pub fn build_text_prompt<S: AsRef<str>>(
    language: &str,
    rule_texts: &[S],
    placeholder: &str,
    context_length: usize,
) -> String {
    compose_text_prompt(language, rule_texts, placeholder, context_length).prompt
}

/// Build the text tagging prompt and report which rules fit the budget
pub fn compose_text_prompt<S: AsRef<str>>(
    language: &str,
    rule_texts: &[S],
    placeholder: &str,
    context_length: usize,
) -> TextPrompt {
    let (head, tail) = text_template(language);
    let base_len = head.len() + tail.len() + TEXT_RULES_SEPARATOR.len();

    let mut rules = String::new();
    let mut included_rules = 0;
    for text in rule_texts {
        let line = rule_line(text.as_ref());
        if estimate_tokens_for_len(base_len + rules.len() + line.len()) > context_length {
            break;
        }
        rules.push_str(&line);
        included_rules += 1;
    }

    let prompt_tokens = estimate_tokens_for_len(base_len + rules.len());

    let mut prompt = String::with_capacity(base_len + rules.len() + placeholder.len());
    prompt.push_str(&head);
    prompt.push_str(&rules);
    prompt.push_str(TEXT_RULES_SEPARATOR);
    let placeholder_at = prompt.len();
    prompt.push_str(placeholder);
    prompt.push_str(&tail);

    TextPrompt {
        prompt,
        included_rules,
        omitted_rules: rule_texts.len() - included_rules,
        content_budget: context_length.saturating_sub(prompt_tokens),
        placeholder_at,
        placeholder_len: placeholder.len(),
    }
}

/// Build the image tagging prompt
pub fn build_image_prompt<S: AsRef<str>>(language: &str, rule_texts: &[S]) -> String {
    let rules: String = rule_texts.iter().map(|t| rule_line(t.as_ref())).collect();

    format!(
        r#"You are a bot in a read-it-later app and your responsibility is to help with automatic tagging.
Please analyze the attached image and suggest relevant tags that describe its key themes, topics, and main ideas. The rules are:
- Aim for a variety of tags, including broad categories, specific keywords, and potential sub-genres.
- The tags language must be in {language}.
- If the tag is not generic enough, don't include it.
- Aim for 10-15 tags.
- If there are no good tags, don't emit any.
{rules}You must respond in valid JSON with the key "tags" and the value is list of tags. Don't wrap the response in a markdown code.
"#
    )
}

// ============================================
// Template pieces
// ============================================

const TEXT_RULES_SEPARATOR: &str = "\nCONTENT START HERE\n";

/// Text template split around the rule lines and the placeholder
fn text_template(language: &str) -> (String, &'static str) {
    let head = format!(
        r#"You are a bot in a read-it-later app and your responsibility is to help with automatic tagging.
Please analyze the text between the sentences "CONTENT START HERE" and "CONTENT END HERE" and suggest relevant tags that describe its key themes, topics, and main ideas. The rules are:
- Aim for a variety of tags, including broad categories, specific keywords, and potential sub-genres.
- The tags language must be in {language}.
- If it's a famous website you may also include a tag for the website. If the tag is not generic enough, don't include it.
- The content can include text for cookie consent and privacy policy, ignore those while tagging.
- Aim for 3-5 tags.
- If there are no good tags, leave the array empty.
"#
    );
    let tail = r#"
CONTENT END HERE
You must respond in JSON with the key "tags" and the value is an array of string tags.
"#;
    (head, tail)
}

fn rule_line(text: &str) -> String {
    format!("- {}\n", text)
}

fn estimate_tokens_for_len(len: usize) -> usize {
    len.div_ceil(CHARS_PER_TOKEN)
}

/// Cut `content` to at most `tokens` estimated tokens on a char boundary
fn truncate_to_tokens(content: &str, tokens: usize) -> &str {
    let max_len = tokens.saturating_mul(CHARS_PER_TOKEN);
    if content.len() <= max_len {
        return content;
    }
    let mut end = max_len;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_RULES: [&str; 0] = [];

    #[test]
    fn test_text_prompt_is_deterministic() {
        let rules = ["R1", "R2"];
        let a = build_text_prompt("english", &rules, "<X>", 1024);
        let b = build_text_prompt("english", &rules, "<X>", 1024);
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_prompt_is_deterministic() {
        let rules = vec!["Describe dominant color".to_string()];
        assert_eq!(
            build_image_prompt("french", rules.as_slice()),
            build_image_prompt("french", rules.as_slice())
        );
    }

    #[test]
    fn test_rules_in_order_and_placeholder_once() {
        let prompt = build_text_prompt("english", &["R1", "R2"], "<X>", 1024);

        let r1 = prompt.find("- R1\n").unwrap();
        let r2 = prompt.find("- R2\n").unwrap();
        assert!(r1 < r2);
        assert_eq!(prompt.matches("<X>").count(), 1);
        assert!(prompt.contains("The tags language must be in english."));
    }

    #[test]
    fn test_rules_come_before_content() {
        let prompt = build_text_prompt("english", &["R1"], "<X>", 1024);
        assert!(prompt.find("- R1").unwrap() < prompt.find("<X>").unwrap());
    }

    #[test]
    fn test_empty_rules_leave_no_dangling_bullet() {
        let prompt = build_text_prompt("english", &NO_RULES, "<X>", 1024);

        assert_eq!(prompt.matches("<X>").count(), 1);
        assert!(!prompt.lines().any(|line| line.trim() == "-"));
        assert!(prompt.contains("- If there are no good tags, leave the array empty.\n\nCONTENT START HERE"));

        let image = build_image_prompt("english", &NO_RULES);
        assert!(!image.lines().any(|line| line.trim() == "-"));
        assert!(image.contains("don't emit any.\nYou must respond"));
    }

    #[test]
    fn test_output_is_never_blank() {
        assert!(!build_text_prompt("", &NO_RULES, "", 0).trim().is_empty());
        assert!(!build_image_prompt("", &NO_RULES).trim().is_empty());
    }

    #[test]
    fn test_image_prompt_lists_rules() {
        let prompt = build_image_prompt("english", &["Describe dominant color", "Be concise"]);
        let color = prompt.find("- Describe dominant color\n").unwrap();
        let concise = prompt.find("- Be concise\n").unwrap();
        assert!(color < concise);
        assert!(prompt.contains("Please analyze the attached image"));
    }

    #[test]
    fn test_generous_budget_keeps_every_rule() {
        let composed = compose_text_prompt("english", &["R1", "R2", "R3"], "<X>", 1024);
        assert_eq!(composed.included_rules, 3);
        assert_eq!(composed.omitted_rules, 0);
        assert!(composed.content_budget > 0);
    }

    #[test]
    fn test_tight_budget_drops_trailing_rules() {
        let base = compose_text_prompt("english", &NO_RULES, "<X>", usize::MAX);
        let base_tokens = usize::MAX - base.content_budget;

        // "- first\n" is 8 bytes = 2 tokens; allow room for exactly that line
        let rules = ["first", "second rule that is rather long", "x"];
        let composed = compose_text_prompt("english", &rules, "<X>", base_tokens + 2);

        assert_eq!(composed.included_rules, 1);
        assert_eq!(composed.omitted_rules, 2);
        assert!(composed.prompt.contains("- first\n"));
        assert!(!composed.prompt.contains("second rule"));
        // the short rule after an omitted one is not admitted either
        assert!(!composed.prompt.contains("- x\n"));
    }

    #[test]
    fn test_base_prompt_kept_when_over_budget() {
        let composed = compose_text_prompt("english", &["R1"], "<X>", 1);
        assert_eq!(composed.included_rules, 0);
        assert_eq!(composed.omitted_rules, 1);
        assert_eq!(composed.content_budget, 0);
        assert!(composed.prompt.contains("CONTENT START HERE\n<X>\nCONTENT END HERE"));
    }

    #[test]
    fn test_fill_substitutes_content() {
        let composed = compose_text_prompt("english", &["R1"], "<X>", 1024);
        let filled = composed.fill("An article about elections");

        assert!(!filled.contains("<X>"));
        assert!(filled.contains("CONTENT START HERE\nAn article about elections\nCONTENT END HERE"));
    }

    #[test]
    fn test_fill_truncates_to_budget() {
        let base = compose_text_prompt("english", &NO_RULES, "<X>", usize::MAX);
        let base_tokens = usize::MAX - base.content_budget;

        let composed = compose_text_prompt("english", &NO_RULES, "<X>", base_tokens + 2);
        assert_eq!(composed.content_budget, 2);

        let filled = composed.fill("abcdefghijkl");
        assert!(filled.contains("CONTENT START HERE\nabcdefgh\nCONTENT END HERE"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // each 'é' is two bytes; a 1-token budget allows 4 bytes
        assert_eq!(truncate_to_tokens("ééé", 1), "éé");
        assert_eq!(truncate_to_tokens("aéé", 1), "aé");
        assert_eq!(truncate_to_tokens("short", 10), "short");
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }
}
