//! Feature flags bundled with a plan tier.

use serde::{Deserialize, Serialize};

/// A capability of the chat product that a plan may or may not grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Voice,
    ImageGeneration,
    FileUpload,
    History,
    ExportChat,
    CustomAgents,
    MakeIntegration,
    ApiIntegration,
    Plugins,
    MultipleAi,
    VideoGeneration,
    AutomationDashboard,
}

impl Feature {
    /// Every gateable feature, in a fixed order (used by monotonicity checks
    /// and feature listings).
    pub const ALL: [Feature; 12] = [
        Feature::Voice,
        Feature::ImageGeneration,
        Feature::FileUpload,
        Feature::History,
        Feature::ExportChat,
        Feature::CustomAgents,
        Feature::MakeIntegration,
        Feature::ApiIntegration,
        Feature::Plugins,
        Feature::MultipleAi,
        Feature::VideoGeneration,
        Feature::AutomationDashboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Voice => "voice",
            Feature::ImageGeneration => "imageGeneration",
            Feature::FileUpload => "fileUpload",
            Feature::History => "history",
            Feature::ExportChat => "exportChat",
            Feature::CustomAgents => "customAgents",
            Feature::MakeIntegration => "makeIntegration",
            Feature::ApiIntegration => "apiIntegration",
            Feature::Plugins => "plugins",
            Feature::MultipleAi => "multipleIA",
            Feature::VideoGeneration => "videoGeneration",
            Feature::AutomationDashboard => "automationDashboard",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where conversation history is kept for a plan.
///
/// Anything other than `Off` counts as "history enabled" for feature checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryMode {
    Off,
    Local,
    Remote,
}

impl HistoryMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, HistoryMode::Off)
    }
}

/// The feature flags granted by one plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    pub voice: bool,
    pub image_generation: bool,
    pub file_upload: bool,
    pub history: HistoryMode,
    pub export_chat: bool,
    pub custom_agents: bool,
    pub make_integration: bool,
    pub api_integration: bool,
    pub plugins: bool,
    pub multiple_ai: bool,
    pub video_generation: bool,
    pub automation_dashboard: bool,
}

impl FeatureSet {
    /// Whether this set grants the given feature.
    ///
    /// The tri-state [`HistoryMode`] is truthy whenever it is not `Off`.
    pub fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::Voice => self.voice,
            Feature::ImageGeneration => self.image_generation,
            Feature::FileUpload => self.file_upload,
            Feature::History => self.history.is_enabled(),
            Feature::ExportChat => self.export_chat,
            Feature::CustomAgents => self.custom_agents,
            Feature::MakeIntegration => self.make_integration,
            Feature::ApiIntegration => self.api_integration,
            Feature::Plugins => self.plugins,
            Feature::MultipleAi => self.multiple_ai,
            Feature::VideoGeneration => self.video_generation,
            Feature::AutomationDashboard => self.automation_dashboard,
        }
    }
}
