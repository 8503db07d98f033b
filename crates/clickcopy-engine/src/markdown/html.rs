use html_escape::{encode_double_quoted_attribute, encode_text};

use super::RenderError;
use super::action::ATTRIBUTE;
use super::inline::Token;

/// Renders inline tokens to an HTML fragment.
pub fn render_inline(tokens: &[Token], out: &mut String) -> Result<(), RenderError> {
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(&encode_text(text)),
            Token::CodeInline(code) => {
                out.push_str("<code>");
                out.push_str(&encode_text(code));
                out.push_str("</code>");
            }
            Token::SoftBreak => out.push('\n'),
            Token::HardBreak => out.push_str("<br>\n"),
            Token::SpanOpen { classes, action } => {
                let json = action.to_attribute()?;
                out.push_str(&format!(
                    "<span class=\"{}\" {ATTRIBUTE}=\"{}\">",
                    classes.join(" "),
                    encode_double_quoted_attribute(&json)
                ));
            }
            Token::SpanClose => out.push_str("</span>"),
        }
    }
    Ok(())
}

pub fn render_fence(info: &str, content: &str, out: &mut String) {
    if info.is_empty() {
        out.push_str("<pre><code>");
    } else {
        out.push_str(&format!(
            "<pre><code class=\"language-{}\">",
            encode_double_quoted_attribute(info)
        ));
    }
    out.push_str(&encode_text(content));
    out.push_str("</code></pre>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::Message;
    use crate::markdown::action::Action;

    #[test]
    fn text_is_escaped() {
        let mut out = String::new();
        render_inline(&[Token::Text("a < b & c".into())], &mut out).unwrap();
        assert_eq!(out, "a &lt; b &amp; c");
    }

    #[test]
    fn action_attribute_is_escaped_json() {
        let mut out = String::new();
        let tokens = [
            Token::SpanOpen {
                classes: vec!["ctc"],
                action: Action {
                    copy: Message::CopyText {
                        text: "say \"hi\"".into(),
                    },
                    reveal: None,
                },
            },
            Token::Text("say \"hi\"".into()),
            Token::SpanClose,
        ];
        render_inline(&tokens, &mut out).unwrap();
        insta::assert_snapshot!(out, @r#"<span class="ctc" data-ctc-action="{&quot;copy&quot;:{&quot;name&quot;:&quot;copyText&quot;,&quot;data&quot;:{&quot;text&quot;:&quot;say \&quot;hi\&quot;&quot;}}}">say "hi"</span>"#);
    }

    #[test]
    fn fence_with_info() {
        let mut out = String::new();
        render_fence("sh", "echo <x>\n", &mut out);
        assert_eq!(out, "<pre><code class=\"language-sh\">echo &lt;x&gt;\n</code></pre>\n");
    }
}
