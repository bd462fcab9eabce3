use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ========================================
/// Artifact shapes shared by generation and fallback
/// ========================================
///
/// Every artifact below is the wire contract between the pipeline and the
/// presentation boundary. Fallback output and model output must both satisfy
/// these shapes; nothing downstream is allowed to care which one it got.

/// One of the four sequential generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Spec,
    Landing,
    Pitch,
    Marketing,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Spec => "spec",
            Stage::Landing => "landing",
            Stage::Pitch => "pitch",
            Stage::Marketing => "marketing",
        }
    }

    /// Output-length ceiling for the completion request. The spec stage
    /// carries a conversation plus a JSON object, so it gets more room.
    pub fn max_tokens(&self) -> u32 {
        match self {
            Stage::Spec => 4096,
            _ => 3072,
        }
    }
}

/// Speaker roles in the simulated expert conversation. Closed set; headers
/// naming anything else are not messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "CEO")]
    Ceo,
    Designer,
    Engineer,
    Marketer,
    #[serde(rename = "CFO")]
    Cfo,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ceo" => Ok(Role::Ceo),
            "designer" => Ok(Role::Designer),
            "engineer" => Ok(Role::Engineer),
            "marketer" => Ok(Role::Marketer),
            "cfo" => Ok(Role::Cfo),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Ceo => "CEO",
            Role::Designer => "Designer",
            Role::Engineer => "Engineer",
            Role::Marketer => "Marketer",
            Role::Cfo => "CFO",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Synthetic milliseconds assigned at parse/generation time; strictly
    /// increasing in display order.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupIdentity {
    pub name: String,
    pub tagline: String,
    pub problem: String,
    pub solution: String,
    pub target_audience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPlan {
    pub features: Vec<String>,
    pub tech_stack: Vec<String>,
    pub mvp_timeline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessModel {
    pub revenue_model: String,
    pub pricing: String,
    pub competitors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingPlan {
    pub channels: Vec<String>,
    pub messaging: String,
    pub launch_strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub month: u32,
    pub revenue: u64,
    pub costs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Financials {
    pub startup_costs: u64,
    pub monthly_burn: u64,
    pub revenue_projections: Vec<MonthlyProjection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSpec {
    pub startup: StartupIdentity,
    pub product: ProductPlan,
    pub business: BusinessModel,
    pub marketing: MarketingPlan,
    pub financials: Financials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTier {
    pub tier: String,
    pub price: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingPage {
    pub hero: Hero,
    pub features: Vec<Feature>,
    pub testimonials: Vec<Testimonial>,
    pub pricing: Vec<PricingTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Slide kind tag ("title", "problem", "solution", ...). Kept as free
    /// text so a model using a near-synonym does not fail the whole stage.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchDeck {
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdCopy {
    pub platform: String,
    pub headline: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingAssets {
    pub tweets: Vec<String>,
    pub linkedin_post: String,
    pub email_sequence: Vec<String>,
    pub ad_copy: Vec<AdCopy>,
}

/// ========================================
/// Pipeline state
/// ========================================

/// Forward-only stage status. The pipeline never moves backwards and never
/// skips, except straight to Complete on an irrecoverable failure surfaced
/// to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Idle,
    Spec,
    Landing,
    Pitch,
    Marketing,
    Complete,
}

impl StageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StageStatus::Idle => "Starting",
            StageStatus::Spec => "Generating Spec",
            StageStatus::Landing => "Creating Landing Page",
            StageStatus::Pitch => "Building Pitch Deck",
            StageStatus::Marketing => "Crafting Marketing",
            StageStatus::Complete => "Complete",
        }
    }
}

/// Immutable-per-step snapshot threaded through the orchestrator. Each stage
/// publishes a new snapshot; fields are only ever added, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    pub idea: String,
    pub conversation: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_spec: Option<BusinessSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<LandingPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_deck: Option<PitchDeck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_assets: Option<MarketingAssets>,
    pub status: StageStatus,
}

impl PipelineState {
    pub fn new(idea: String) -> Self {
        Self {
            idea,
            conversation: Vec::new(),
            business_spec: None,
            landing_page: None,
            pitch_deck: None,
            marketing_assets: None,
            status: StageStatus::Idle,
        }
    }
}
