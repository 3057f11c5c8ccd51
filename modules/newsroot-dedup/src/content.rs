//! Builds the one comparable text string per story that the vectorizers see.

use newsroot_common::Story;

/// `trim(title) + " " + trim(body_text)`, with missing fields as empty
/// strings. No casing or punctuation normalization here; that belongs to the
/// vectorizer, if anywhere.
pub fn build_content(story: &Story) -> String {
    let title = story.title.as_deref().unwrap_or("").trim();
    let body = story.body_text.as_deref().unwrap_or("").trim();
    format!("{title} {body}")
}

/// One content string per story, same order as the input.
pub fn build_contents(stories: &[Story]) -> Vec<String> {
    stories.iter().map(build_content).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(id: i64, title: Option<&str>, body: Option<&str>) -> Story {
        Story {
            id,
            title: title.map(String::from),
            body_text: body.map(String::from),
            root_id: None,
            article_url: None,
        }
    }

    #[test]
    fn joins_title_and_body() {
        let s = story(1, Some("Mayor resigns"), Some("The mayor stepped down."));
        assert_eq!(build_content(&s), "Mayor resigns The mayor stepped down.");
    }

    #[test]
    fn trims_both_fields() {
        let s = story(1, Some("  Mayor resigns  "), Some("  body  "));
        assert_eq!(build_content(&s), "Mayor resigns body");
    }

    #[test]
    fn missing_fields_become_empty() {
        let s = story(1, None, None);
        assert_eq!(build_content(&s), " ");

        let title_only = story(2, Some("Title"), None);
        assert_eq!(build_content(&title_only), "Title ");
    }

    #[test]
    fn preserves_input_order() {
        let stories = vec![story(3, Some("c"), None), story(1, Some("a"), None)];
        let contents = build_contents(&stories);
        assert_eq!(contents, vec!["c ", "a "]);
    }
}
