//! Markdown subset to sanitized HTML: headings, bold, italic, inline code,
//! links and line breaks. No lists, no paragraphs.
//!
//! Pipeline: [`lexer::tokenize`] → [`parser::parse`] → [`html::emit`].

mod html;
mod lexer;
mod parser;

pub use html::emit;
pub(crate) use html::is_safe_href;
pub use parser::{parse, Block, Document, Inline};

/// Render assistant-authored text to an HTML fragment. Every piece of source
/// text is escaped on output, so generated tags are the only markup present.
pub fn render(text: &str) -> String {
    emit(&parse(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn renders_each_construct() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("### Sub"), "<h3>Sub</h3>");
        assert_eq!(render("**b** __b__"), "<strong>b</strong> <strong>b</strong>");
        assert_eq!(render("*i* _i_"), "<em>i</em> <em>i</em>");
        assert_eq!(render("`x < y`"), "<code>x &lt; y</code>");
        assert_eq!(
            render("[site](https://example.com/?a=1&b=2)"),
            "<a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\" \
             rel=\"noopener noreferrer\">site</a>"
        );
    }

    #[test]
    fn strong_containing_emphasis() {
        assert_eq!(render("**_x_**"), "<strong><em>x</em></strong>");
    }

    #[test]
    fn lone_star_stays_literal() {
        assert_eq!(render("5 * 3"), "5 * 3");
        assert_eq!(render("*"), "*");
    }

    #[test]
    fn newlines_become_breaks_and_dashes_stay_text() {
        assert_eq!(
            render("## Summary\n- Debit: 100\n- Credit: 100"),
            "<h2>Summary</h2><br>- Debit: 100<br>- Credit: 100"
        );
    }

    #[test]
    fn script_is_escaped() {
        assert_eq!(
            render("<script>alert('x')</script>"),
            "&lt;script&gt;alert('x')&lt;/script&gt;"
        );
    }

    #[test]
    fn quotes_cannot_break_out_of_href() {
        let html = render(r#"[x](http://a" onclick="evil)"#);
        assert_eq!(
            html,
            "<a href=\"http://a&quot; onclick=&quot;evil\" target=\"_blank\" \
             rel=\"noopener noreferrer\">x</a>"
        );
    }

    #[test]
    fn script_links_render_as_text() {
        assert_eq!(render("[click](javascript:alert)"), "click");
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
    }

    /// Remove every tag the emitter can generate; what remains is text.
    fn strip_generated_tags(html: &str) -> String {
        let tags = regex::Regex::new(
            r#"</?(h1|h2|h3|strong|em|code)>|<br>|<a href="[^"<>]*" target="_blank" rel="noopener noreferrer">|</a>"#,
        )
        .unwrap();
        tags.replace_all(html, "").into_owned()
    }

    proptest! {
        #[test]
        fn no_unescaped_markup_outside_generated_tags(s in r#"[a-z <>&*_`\[\]()#\n"':/]{0,64}"#) {
            let text = strip_generated_tags(&render(&s));
            prop_assert!(!text.contains('<'), "stray '<' in {text:?}");
            prop_assert!(!text.contains('>'), "stray '>' in {text:?}");
            let entity = regex::Regex::new(r"^&(amp|lt|gt|quot|#39);").unwrap();
            for (idx, _) in text.match_indices('&') {
                prop_assert!(entity.is_match(&text[idx..]), "bare '&' in {text:?}");
            }
        }

        #[test]
        fn plain_text_is_unchanged_apart_from_breaks(s in "[a-zA-Z0-9 .,:;!?\n-]{0,64}") {
            prop_assert_eq!(render(&s), s.replace('\n', "<br>"));
        }
    }
}
