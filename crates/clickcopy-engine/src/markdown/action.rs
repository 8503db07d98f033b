//! Event descriptors for rendered spans.
//!
//! Static HTML cannot hold closures, so each span carries a JSON descriptor in
//! its `data-ctc-action` attribute. The page script parses it and hands it to
//! [`dispatch`] with the kind of activation; span text never ends up inside
//! executable source.

use serde::{Deserialize, Serialize};

use crate::copy::Message;
use crate::scan::SpanMatch;

pub const ATTRIBUTE: &str = "data-ctc-action";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Posted on primary activation.
    pub copy: Message,
    /// Present for password spans only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    pub text: String,
    pub mask: String,
    pub target: RevealTarget,
}

/// Element whose text a reveal toggle rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealTarget {
    Container,
    /// The `<code>` child of a code-styled span.
    NestedCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Copy(Message),
    SetText { target: RevealTarget, text: String },
    Ignore,
}

impl Action {
    pub fn for_span(m: &SpanMatch) -> Self {
        let reveal = m.is_password.then(|| Reveal {
            text: m.copy_text.clone(),
            mask: m.display_text.clone(),
            target: if m.is_code_styled {
                RevealTarget::NestedCode
            } else {
                RevealTarget::Container
            },
        });
        Self {
            copy: Message::copy(m.copy_text.clone(), m.clear_clipboard),
            reveal,
        }
    }

    /// A plain copy of generic inline code.
    pub fn for_code(copy_text: &str) -> Self {
        Self {
            copy: Message::copy(copy_text, false),
            reveal: None,
        }
    }

    pub fn to_attribute(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_attribute(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Interprets `action` for one activation. `current_text` is the text the
/// reveal target shows right now.
pub fn dispatch(action: &Action, activation: Activation, current_text: &str) -> Dispatch {
    match activation {
        Activation::Primary => Dispatch::Copy(action.copy.clone()),
        Activation::Secondary => match &action.reveal {
            Some(reveal) => {
                let text = if current_text == reveal.mask {
                    reveal.text.clone()
                } else {
                    reveal.mask.clone()
                };
                Dispatch::SetText {
                    target: reveal.target,
                    text,
                }
            }
            None => Dispatch::Ignore,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use clickcopy_config::Settings;
    use pretty_assertions::assert_eq;

    fn action(line: &str) -> Action {
        Action::for_span(&scan(line, &Settings::default()).next().unwrap())
    }

    #[test]
    fn primary_copies() {
        let a = action("[[npm install]]");
        assert_eq!(
            dispatch(&a, Activation::Primary, "npm install"),
            Dispatch::Copy(Message::CopyText {
                text: "npm install".into()
            })
        );
        assert_eq!(
            dispatch(&a, Activation::Secondary, "npm install"),
            Dispatch::Ignore
        );
    }

    #[test]
    fn secondary_toggles_password() {
        let a = action("[[[[pw]]");
        let shown = dispatch(&a, Activation::Secondary, "••");
        assert_eq!(
            shown,
            Dispatch::SetText {
                target: RevealTarget::Container,
                text: "pw".into()
            }
        );
        let hidden = dispatch(&a, Activation::Secondary, "pw");
        assert_eq!(
            hidden,
            Dispatch::SetText {
                target: RevealTarget::Container,
                text: "••".into()
            }
        );
    }

    #[test]
    fn code_styled_password_targets_nested_code() {
        let a = action("[[[[`pw`]]");
        assert_eq!(a.reveal.unwrap().target, RevealTarget::NestedCode);
    }

    #[test]
    fn attribute_is_structured_json() {
        let a = action("[[\"quoted\" <b>]]]]");
        let raw = a.to_attribute().unwrap();
        assert_eq!(
            raw,
            r#"{"copy":{"name":"copyPassword","data":{"text":"\"quoted\" <b>"}}}"#
        );
        assert_eq!(Action::from_attribute(&raw).unwrap(), a);
    }
}
