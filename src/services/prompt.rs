// src/services/prompt.rs

use crate::message::ChatContext;

/// Instruction block, one line per fragment.
const INSTRUCTIONS: &[&str] = &[
    "You are the assistant of the Physical AI Knowledge Hub, a research dashboard about how AI is reshaping industrial automation.",
    "Answer concisely and concretely. Prefer short paragraphs or bullet lists, and say so when the hub does not cover a topic.",
    "",
    "FRAMEWORK:",
    "The hub maps the industry as a matrix of 8 technology layers by 10 industry verticals (80 cells).",
    "Layers: Foundation Models, Simulation & Synthetic Data, Perception & Sensing, Edge Compute & Silicon, Robot Hardware & Actuation, Control & Orchestration Software, Systems Integration, Data & Connectivity.",
    "Verticals: Automotive, Electronics & Semiconductors, Logistics & Warehousing, Food & Beverage, Pharma & Life Sciences, Metals & Mining, Chemicals & Process, Aerospace & Defense, Energy & Utilities, Agriculture.",
    "Each cell lists incumbents, challengers, market dynamics and adoption constraints for that layer in that vertical.",
    "",
    "OTHER VIEWS:",
    "- Players: strategy profiles of incumbents (Siemens, ABB, Rockwell Automation, Fanuc, KUKA, Yaskawa, Schneider Electric) and challengers (NVIDIA, Figure, Agility Robotics, Physical Intelligence, Covariant, Skild AI, Intrinsic).",
    "- Industries: buyer maps per vertical, showing who purchases automation and what blocks adoption.",
    "- Models: a taxonomy of foundation models for the physical world (vision-language-action models, world models, robot policies, simulation-trained controllers).",
    "",
    "NAVIGATION LINKS:",
    "When you mention something the hub has a page for, you may link to it with the syntax [Label](#nav:tab/item).",
    "Valid tabs are matrix, players, industries and models. Examples: [NVIDIA](#nav:players/nvidia), [Automotive](#nav:industries/automotive), [Perception & Sensing](#nav:matrix/perception-sensing).",
    "Only link to items named above and never invent other link formats.",
];

const CONTEXT_HEADER: &str = "\n\nCurrent user context:\n";

const CONTEXT_DISCLAIMER: &str = "\nNote: The user may ask about something general or different from what they are viewing. Answer their actual question and do not assume it is about the selected context unless they specifically reference it.";

const QUESTION_PREFIX: &str = "\n\nUser question: ";

/// One optional context hint, in the order it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextHint {
    ActiveTab,
    SelectedVertical,
    SelectedLayer,
    SelectedPlayer,
}

impl ContextHint {
    pub const ALL: [ContextHint; 4] = [
        ContextHint::ActiveTab,
        ContextHint::SelectedVertical,
        ContextHint::SelectedLayer,
        ContextHint::SelectedPlayer,
    ];

    /// The hint's value, if the caller sent a non-empty one.
    pub fn value(self, context: &ChatContext) -> Option<&str> {
        let raw = match self {
            ContextHint::ActiveTab => context.active_tab.as_deref(),
            ContextHint::SelectedVertical => context.selected_vertical.as_deref(),
            ContextHint::SelectedLayer => context.selected_layer.as_deref(),
            ContextHint::SelectedPlayer => context.selected_player.as_deref(),
        };
        raw.filter(|v| !v.is_empty())
    }

    pub fn render(self, value: &str) -> String {
        match self {
            ContextHint::ActiveTab => format!("- Currently viewing: {value} tab\n"),
            ContextHint::SelectedVertical => format!("- Selected vertical: {value}\n"),
            ContextHint::SelectedLayer => format!("- Selected layer: {value}\n"),
            ContextHint::SelectedPlayer => format!("- Selected player: {value}\n"),
        }
    }
}

pub fn instruction_block() -> String {
    INSTRUCTIONS.join("\n")
}

/// Context lines for every hint present, in fixed order.
pub fn context_lines(context: &ChatContext) -> Vec<String> {
    ContextHint::ALL
        .iter()
        .filter_map(|hint| hint.value(context).map(|v| hint.render(v)))
        .collect()
}

pub fn context_block(context: &ChatContext) -> String {
    let mut block = String::from(CONTEXT_HEADER);
    for line in context_lines(context) {
        block.push_str(&line);
    }
    block.push_str(CONTEXT_DISCLAIMER);
    block
}

pub fn build_prompt(message: &str, context: Option<&ChatContext>) -> String {
    let mut prompt = instruction_block();
    if let Some(ctx) = context {
        prompt.push_str(&context_block(ctx));
    }
    prompt.push_str(QUESTION_PREFIX);
    prompt.push_str(message);
    prompt
}
