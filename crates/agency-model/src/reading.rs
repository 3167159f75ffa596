//! Reading-time estimate for blog posts

use pulldown_cmark::{Event, Parser};

/// Average adult reading speed used for estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Count words in the rendered text of a markdown document
///
/// Markup does not count; inline and fenced code does.
#[must_use]
pub fn word_count(markdown: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => {
                for ch in text.chars() {
                    if ch.is_whitespace() {
                        in_word = false;
                    } else if !in_word {
                        in_word = true;
                        count += 1;
                    }
                }
            }
            // Block and line boundaries end the current word
            Event::SoftBreak | Event::HardBreak | Event::End(_) | Event::Start(_) => {
                in_word = false;
            }
            _ => {}
        }
    }
    count
}

/// Estimated minutes to read a markdown document, at least one
#[must_use]
pub fn reading_time(markdown: &str) -> u32 {
    let minutes = word_count(markdown).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_not_counted() {
        assert_eq!(word_count("# Title\n\nSome **bold** text."), 4);
        assert_eq!(word_count("[a link](https://example.com)"), 2);
    }

    #[test]
    fn code_is_counted() {
        assert_eq!(word_count("Run `cargo build` now"), 4);
    }

    #[test]
    fn short_posts_take_one_minute() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("just a few words"), 1);
    }

    #[test]
    fn long_posts_round_up() {
        let body = "word ".repeat(401);
        assert_eq!(reading_time(&body), 3);
    }
}
