use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pla_tong_data::models::{
    AboutUs, BpCategory, DemoSlide, ExternalLinks, Feature, LifestyleTip, Review,
};
use pla_tong_domain::entities::StatsSnapshot;

/// Everything the home page renders
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub stats: StatsSnapshot,
    pub about: AboutUs,
    pub features: Vec<Feature>,
    pub reviews: Vec<Review>,
    pub demo_slides: Vec<DemoSlide>,
    pub links: ExternalLinks,
}

/// Everything the knowledge page renders
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KnowledgeResponse {
    /// Interpretation table, lowest severity first
    pub interpretation: Vec<BpCategory>,
    pub tips: Vec<LifestyleTip>,
    pub notes: Vec<String>,
    pub emergency_advisory: String,
    pub links: ExternalLinks,
}
