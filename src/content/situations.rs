//! Situation catalog and anchor-session copy blocks.

use serde::{Deserialize, Serialize};

/// One selectable situation on the situation-entry page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Situation {
    /// Stable identifier referenced by [`AnchorContent`].
    pub id: String,
    /// Body-sensation phrased label shown to the user.
    pub label: String,
}

/// One streamed line of the cognitive-unpacking phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveStep {
    /// Display text; may contain embedded newlines.
    pub text: String,
}

/// Everything the cognitive and reframe phases show for one situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorContent {
    /// Content id (matches the situation id it belongs to).
    pub id: String,
    /// The situation this content is keyed under.
    pub situation: String,
    /// Ordered steps streamed one at a time during the cognitive phase.
    pub cognitive_steps: Vec<CognitiveStep>,
    /// The old narrative, rendered struck through.
    pub old_narrative: String,
    /// The replacement cognition, revealed after a short delay.
    pub new_cognition: String,
}

/// Copy for the opening value-statement page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueStatement {
    #[serde(default)]
    pub title: String,
    /// Multi-line statement body.
    pub content: String,
    /// Label of the single call-to-action button.
    pub button_text: String,
}

/// A host-side action offered on the aftercare page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAction {
    pub id: String,
    pub label: String,
}

/// Copy for the closing aftercare page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AftercareContent {
    #[serde(default)]
    pub title: String,
    /// Main closing message.
    pub message: String,
    /// Secondary lines under the message.
    #[serde(default)]
    pub subtitle: String,
    /// Small physical actions suggested before leaving.
    #[serde(default)]
    pub grounding_actions: Vec<String>,
    /// Primary "back to life" action.
    #[serde(default)]
    pub main_action: Option<SessionAction>,
    /// Hint shown above the secondary action.
    #[serde(default)]
    pub secondary_hint: Option<String>,
    /// Secondary (e.g. save) action.
    #[serde(default)]
    pub secondary_action: Option<SessionAction>,
}
