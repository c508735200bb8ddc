// Data models for static content and remote counters
pub mod content;
pub mod stats;

pub use content::{
    AboutUs, BotMessage, BpCategory, BpLevel, DemoSlide, ExternalLinks, Feature, LifestyleTip,
    Review, SiteContent, Step, UserMessage,
};
pub use stats::{SiteStats, DEFAULT_STATS};
