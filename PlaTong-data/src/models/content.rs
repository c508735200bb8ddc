use serde::{Deserialize, Serialize};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// One instructional step of the measurement guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position of the step in the guide
    #[validate(range(min = 1, message = "Step id must be at least 1"))]
    pub id: u32,

    /// Step heading
    #[validate(length(min = 1, message = "Step title cannot be empty"))]
    pub title: String,

    /// Body text
    pub content: String,

    /// Ordered bullet points
    #[serde(default)]
    pub points: Vec<String>,

    /// Countdown length in seconds; absent when the step has no timer
    #[validate(range(min = 1, message = "Step timer must be a positive number of seconds"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u32>,

    /// Narration audio reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,

    /// Illustration reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// External link shown under the step
    #[validate(url(message = "Step link must be an absolute URL"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Label for the external link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
}

/// Severity tier of a blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BpLevel {
    /// Systolic < 120 and diastolic < 80
    Normal,
    /// Systolic 120-129 and diastolic < 80
    Elevated,
    /// Systolic 130-139 or diastolic 80-89
    Stage1,
    /// Systolic >= 140 or diastolic >= 90
    Stage2,
    /// Systolic > 180 or diastolic > 120
    Crisis,
}

impl BpLevel {
    /// Every level, lowest severity first
    pub const ALL: [BpLevel; 5] = [
        BpLevel::Normal,
        BpLevel::Elevated,
        BpLevel::Stage1,
        BpLevel::Stage2,
        BpLevel::Crisis,
    ];

    /// Whether a reading at this level needs the emergency advisory
    pub fn is_emergency(self) -> bool {
        matches!(self, BpLevel::Crisis)
    }
}

impl std::fmt::Display for BpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BpLevel::Normal => write!(f, "Normal"),
            BpLevel::Elevated => write!(f, "Elevated"),
            BpLevel::Stage1 => write!(f, "Hypertension Stage 1"),
            BpLevel::Stage2 => write!(f, "Hypertension Stage 2"),
            BpLevel::Crisis => write!(f, "Hypertensive Crisis"),
        }
    }
}

/// A row of the interpretation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BpCategory {
    /// Machine-readable level
    pub level: BpLevel,

    /// Display name of the level
    #[validate(length(min = 1))]
    pub label: String,

    /// Systolic range description, e.g. "130-139"
    pub systolic: String,

    /// Diastolic range description
    pub diastolic: String,

    /// Advice for a reading in this band
    #[validate(length(min = 1))]
    pub action: String,

    /// Badge color as a CSS hex value
    pub color: String,

    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Feature {
    pub icon: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
}

/// User testimonial shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Review {
    pub name: String,
    pub role: String,
    pub text: String,
    /// Star rating, 1 to 5
    #[validate(range(min = 1, max = 5, message = "Review rating must be between 1 and 5"))]
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct AboutUs {
    #[validate(length(min = 1))]
    pub tagline: String,
    pub mission: String,
    pub description: String,
}

/// Lifestyle modification tip on the knowledge page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct LifestyleTip {
    pub icon: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    /// Revealed when the tip card is expanded
    #[serde(default)]
    pub details: Vec<String>,
}

/// What the user sends in a chat demo slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserMessage {
    Image { icon: String, text: String },
    Text { text: String },
}

/// What the bot answers in a chat demo slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotMessage {
    Bp {
        systolic: u16,
        diastolic: u16,
        pulse: u16,
        status: String,
        #[serde(rename = "statusColor")]
        status_color: String,
        icon: String,
    },
    Chart {
        text: String,
    },
    Appointment {
        date: String,
        time: String,
        doctor: String,
        icon: String,
    },
    Text {
        text: String,
    },
}

/// One slide of the phone carousel on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DemoSlide {
    pub id: u32,
    pub title: String,
    pub user_message: UserMessage,
    pub bot_messages: Vec<BotMessage>,
}

/// Outbound links, opened in a new browsing context by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ExternalLinks {
    /// LINE Official Account deep link
    #[validate(url)]
    pub line_oa: String,

    /// Facebook page
    #[validate(url)]
    pub facebook: String,
}

/// All static content served by the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SiteContent {
    #[validate]
    pub about: AboutUs,

    #[validate]
    pub features: Vec<Feature>,

    #[validate]
    pub reviews: Vec<Review>,

    #[serde(default)]
    pub demo_slides: Vec<DemoSlide>,

    #[validate]
    pub steps: Vec<Step>,

    /// Interpretation table, lowest severity first
    #[validate]
    pub interpretation: Vec<BpCategory>,

    #[validate]
    pub tips: Vec<LifestyleTip>,

    /// "Important notes" on the knowledge page
    #[serde(default)]
    pub notes: Vec<String>,

    /// Shown prominently with a crisis reading
    #[validate(length(min = 1))]
    pub emergency_advisory: String,

    #[validate]
    pub links: ExternalLinks,
}
