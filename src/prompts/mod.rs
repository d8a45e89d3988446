use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

// NOTE:
// Companion prompts ship with the binary. Only the student name and
// the activity context are substituted at request time.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Encouragement,
    Correction,
    Celebration,
    Focus,
}

impl MessageKind {
    pub const ALL: [MessageKind; 4] = [
        MessageKind::Encouragement,
        MessageKind::Correction,
        MessageKind::Celebration,
        MessageKind::Focus,
    ];

    /// Unknown or missing labels fall back to `Encouragement`.
    pub fn from_label(label: Option<&str>) -> Self {
        MessageKind::ALL
            .into_iter()
            .find(|kind| label == Some(kind.as_str()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Encouragement => "encouragement",
            MessageKind::Correction => "correction",
            MessageKind::Celebration => "celebration",
            MessageKind::Focus => "focus",
        }
    }
}

#[derive(Deserialize)]
struct PromptFile {
    prompts: HashMap<String, String>,
}

macro_rules! prompt_file {
    ($lang:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/lang/",
            $lang,
            "/companion_prompts.json"
        ))
    };
}

static EN_PROMPTS: Lazy<Environment<'static>> =
    Lazy::new(|| load_prompt_env(prompt_file!("en")));

fn load_prompt_env(raw: &str) -> Environment<'static> {
    let parsed: PromptFile = serde_json::from_str(raw).expect("invalid companion prompt config");
    let mut env = Environment::new();
    for (kind, source) in parsed.prompts {
        env.add_template_owned(kind, source)
            .expect("invalid companion prompt template");
    }
    env
}

/// Render the fixed prompt for `kind`. Values are inserted verbatim; the
/// `focus` template does not reference `context`.
pub fn build_companion_prompt(
    kind: MessageKind,
    student_name: &str,
    context: &str,
) -> Result<String, minijinja::Error> {
    EN_PROMPTS
        .get_template(kind.as_str())?
        .render(context! { name => student_name, context => context })
}

#[cfg(test)]
mod tests {
    use super::{build_companion_prompt, MessageKind};

    #[test]
    fn renders_encouragement_template() {
        let prompt =
            build_companion_prompt(MessageKind::Encouragement, "Abebe", "They counted to 10.")
                .unwrap();
        assert_eq!(
            prompt,
            "You are Abebe's friendly AI study companion. They counted to 10. Give them a short, warm, encouraging message (2-3 sentences max)."
        );
    }

    #[test]
    fn renders_correction_template() {
        let prompt =
            build_companion_prompt(MessageKind::Correction, "Liya", "They picked 4 instead of 5.")
                .unwrap();
        assert_eq!(
            prompt,
            "You are Liya's patient AI study companion. They picked 4 instead of 5. Gently help them understand their mistake with a kind explanation (2-3 sentences max)."
        );
    }

    #[test]
    fn renders_celebration_template() {
        let prompt =
            build_companion_prompt(MessageKind::Celebration, "Sam", "They finished the game.")
                .unwrap();
        assert_eq!(
            prompt,
            "You are Sam's enthusiastic AI study companion. They finished the game. Celebrate their success warmly (2-3 sentences max)."
        );
    }

    #[test]
    fn focus_template_ignores_context() {
        let prompt =
            build_companion_prompt(MessageKind::Focus, "Sam", "should not appear").unwrap();
        assert_eq!(
            prompt,
            "You are Sam's supportive AI study companion. Help them refocus with a gentle reminder about staying on task (2-3 sentences max)."
        );
    }

    #[test]
    fn empty_context_keeps_surrounding_spaces() {
        let prompt = build_companion_prompt(MessageKind::Encouragement, "Student", "").unwrap();
        assert_eq!(
            prompt,
            "You are Student's friendly AI study companion.  Give them a short, warm, encouraging message (2-3 sentences max)."
        );
    }

    #[test]
    fn substitutes_values_verbatim() {
        let prompt = build_companion_prompt(
            MessageKind::Celebration,
            "{{ context }} <b>&",
            "{% if true %}x{% endif %}",
        )
        .unwrap();
        assert_eq!(
            prompt,
            "You are {{ context }} <b>&'s enthusiastic AI study companion. {% if true %}x{% endif %} Celebrate their success warmly (2-3 sentences max)."
        );
    }

    #[test]
    fn every_kind_has_a_template() {
        for kind in MessageKind::ALL {
            assert!(build_companion_prompt(kind, "A", "B").is_ok(), "{kind:?}");
        }
    }

    #[test]
    fn unknown_labels_fall_back_to_encouragement() {
        assert_eq!(MessageKind::from_label(None), MessageKind::Encouragement);
        assert_eq!(MessageKind::from_label(Some("scold")), MessageKind::Encouragement);
        assert_eq!(MessageKind::from_label(Some("Focus")), MessageKind::Encouragement);
        assert_eq!(MessageKind::from_label(Some("focus")), MessageKind::Focus);
        for kind in MessageKind::ALL {
            assert_eq!(MessageKind::from_label(Some(kind.as_str())), kind);
        }
    }
}
