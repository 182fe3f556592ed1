use ideaswipe_core::{Idea, IdeaField};

/// What the model is being asked to do.
#[derive(Debug, Clone, Copy)]
pub enum PromptKind<'a> {
    Generate,
    Refine(&'a Idea),
}

const GENERATE_TASK: &str = "Generate a professional startup idea that could realistically be built \
and funded. Focus on solving real problems with innovative technology or business models.";

const REFINE_TASK: &str = "Refine and improve this startup idea by addressing potential weaknesses, \
exploring new angles, or pivoting to a better market opportunity.";

const VIBE_HINT: &str = "Business category (e.g., 'B2B SaaS', 'HealthTech', 'FinTech', 'EdTech', \
'ClimateTech', 'Enterprise Software')";

const GENERATE_REQUIREMENTS: &[&str] = &[
    "Focus on scalable, technology-enabled businesses",
    "Avoid consumer social apps or simple marketplace ideas",
    "Include realistic market sizing and business metrics",
    "Emphasize defensible competitive advantages",
    "Consider regulatory and technical feasibility",
    "Target B2B or B2B2C models when possible",
    "Avoid excessive emojis or casual language",
];

const REFINE_REQUIREMENTS: &[&str] = &[
    "Significantly improve upon the original idea",
    "Address any weaknesses or gaps in the original",
    "Consider market feedback and pivot opportunities",
    "Avoid consumer social apps or simple marketplace ideas",
    "Include realistic market sizing and business metrics",
    "Emphasize defensible competitive advantages",
    "Target B2B or B2B2C models when possible",
    "Maintain professional, realistic business focus",
    "Avoid excessive emojis or casual language",
];

fn generate_hint(field: IdeaField) -> &'static str {
    match field {
        IdeaField::Name => "Professional company name (2-4 words)",
        IdeaField::Tagline => "Clear value proposition in one sentence",
        IdeaField::Pitch => {
            "Concise 2-3 sentence explanation of the business concept and market opportunity"
        }
        IdeaField::Vibe => VIBE_HINT,
        IdeaField::Problem => {
            "Specific, measurable problem that affects a large market. Include statistics or \
market size if relevant."
        }
        IdeaField::Solution => {
            "Clear explanation of how the product/service solves the problem. List 2-3 core \
features that differentiate from competitors."
        }
        IdeaField::TargetAudience => {
            "Specific customer segment with clear demographics, pain points, and willingness to \
pay. Include market size estimates."
        }
        IdeaField::SecretSauce => {
            "Competitive advantage: proprietary technology, network effects, data moats, or \
unique business model that creates defensibility."
        }
        IdeaField::Monetization => {
            "Specific revenue model with pricing tiers, customer acquisition costs, and unit \
economics. Include projected ARR or revenue targets."
        }
        IdeaField::Hurdle => {
            "Most significant business risk: regulatory challenges, technical complexity, market \
adoption, or competitive threats."
        }
        IdeaField::FirstStep => {
            "Concrete 30-60 day action plan to validate the idea: customer interviews, MVP \
development, or pilot program with specific metrics."
        }
    }
}

fn refine_hint(field: IdeaField) -> &'static str {
    match field {
        IdeaField::Name => "Refined company name (2-4 words)",
        IdeaField::Tagline => "Improved value proposition in one sentence",
        IdeaField::Pitch => {
            "Enhanced 2-3 sentence explanation of the business concept and market opportunity"
        }
        IdeaField::Vibe => VIBE_HINT,
        IdeaField::Problem => {
            "More specific, measurable problem with better market sizing and statistics"
        }
        IdeaField::Solution => {
            "Improved solution with 2-3 core features that better differentiate from competitors"
        }
        IdeaField::TargetAudience => {
            "Refined customer segment with clearer demographics, pain points, and willingness to pay"
        }
        IdeaField::SecretSauce => {
            "Stronger competitive advantage with proprietary technology, network effects, or \
unique business model"
        }
        IdeaField::Monetization => {
            "Better revenue model with realistic pricing tiers and unit economics"
        }
        IdeaField::Hurdle => "Addressed business risk with mitigation strategies",
        IdeaField::FirstStep => "More concrete 30-60 day action plan with specific metrics",
    }
}

/// Render the JSON object template the model must fill, one key per line.
fn schema_block(hint: fn(IdeaField) -> &'static str) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str("{\n");
    let last = IdeaField::ALL.len() - 1;
    for (i, field) in IdeaField::ALL.into_iter().enumerate() {
        out.push_str("  \"");
        out.push_str(field.key());
        out.push_str("\": ");
        // serde_json escapes the quotes inside hints like 'B2B SaaS'
        out.push_str(&serde_json::Value::from(hint(field)).to_string());
        if i != last {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

fn requirements_block(items: &[&str]) -> String {
    items
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the single instruction string sent to the model.
pub fn build_prompt(kind: PromptKind<'_>) -> String {
    match kind {
        PromptKind::Generate => format!(
            "{GENERATE_TASK}\n\n\
Return ONLY a valid JSON object in this exact format:\n\n\
{schema}\n\n\
Requirements:\n{requirements}",
            schema = schema_block(generate_hint),
            requirements = requirements_block(GENERATE_REQUIREMENTS),
        ),
        PromptKind::Refine(idea) => format!(
            "{REFINE_TASK}\n\n\
Current idea: {current}\n\n\
Return ONLY a valid JSON object in this exact format with the refined idea:\n\n\
{schema}\n\n\
Requirements:\n{requirements}",
            current = serde_json::to_string_pretty(idea).unwrap_or_default(),
            schema = schema_block(refine_hint),
            requirements = requirements_block(REFINE_REQUIREMENTS),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_prompt_lists_every_key() {
        let prompt = build_prompt(PromptKind::Generate);
        for field in IdeaField::ALL {
            assert!(
                prompt.contains(&format!("\"{}\":", field.key())),
                "missing {}",
                field.key()
            );
        }
        assert!(prompt.contains("Return ONLY a valid JSON object"));
        assert!(prompt.contains("- Target B2B or B2B2C models when possible"));
        assert!(!prompt.contains("Current idea"));
    }

    #[test]
    fn schema_block_is_valid_json() {
        let block = schema_block(generate_hint);
        let value: serde_json::Value = serde_json::from_str(&block).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 11);
        assert!(value["vibe"].as_str().unwrap().contains("'B2B SaaS'"));
    }

    #[test]
    fn refine_prompt_embeds_current_idea() {
        let idea = Idea {
            name: Some("Quill \"Ops\"".into()),
            hurdle: Some("Sales cycles".into()),
            ..Default::default()
        };
        let prompt = build_prompt(PromptKind::Refine(&idea));
        assert!(prompt.starts_with(REFINE_TASK));
        assert!(prompt.contains(&serde_json::to_string_pretty(&idea).unwrap()));
        assert!(prompt.contains("Refined company name (2-4 words)"));
        assert!(prompt.contains("- Address any weaknesses or gaps in the original"));
    }

    #[test]
    fn both_prompts_share_core_requirements() {
        let refine = build_prompt(PromptKind::Refine(&Idea::default()));
        for prompt in [build_prompt(PromptKind::Generate), refine] {
            for line in [
                "- Avoid consumer social apps or simple marketplace ideas",
                "- Include realistic market sizing and business metrics",
                "- Emphasize defensible competitive advantages",
                "- Target B2B or B2B2C models when possible",
                "- Avoid excessive emojis or casual language",
            ] {
                assert!(prompt.contains(line), "missing {line:?}");
            }
        }
    }

    #[test]
    fn prompts_are_deterministic() {
        assert_eq!(
            build_prompt(PromptKind::Generate),
            build_prompt(PromptKind::Generate)
        );
    }
}
