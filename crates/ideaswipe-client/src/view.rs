//! Render instructions. The state machine produces these; a presentation
//! layer decides how they look.

use ideaswipe_core::{Idea, IdeaField};

/// Shown instead of a field the model left out.
pub const PLACEHOLDER: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Card {
        name: String,
        vibe: String,
        tagline: String,
        pitch: String,
    },
    Detail {
        name: String,
        sections: Vec<Section>,
    },
    Error {
        message: String,
    },
}

fn text(idea: &Idea, field: IdeaField) -> String {
    idea.get(field)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

impl View {
    pub fn card(idea: &Idea) -> Self {
        View::Card {
            name: text(idea, IdeaField::Name),
            vibe: text(idea, IdeaField::Vibe),
            tagline: text(idea, IdeaField::Tagline),
            pitch: text(idea, IdeaField::Pitch),
        }
    }

    pub fn detail(idea: &Idea) -> Self {
        View::Detail {
            name: text(idea, IdeaField::Name),
            sections: IdeaField::NARRATIVE
                .into_iter()
                .map(|field| Section {
                    label: field.label(),
                    text: text(idea, field),
                })
                .collect(),
        }
    }
}
