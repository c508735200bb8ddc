use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Content endpoints
        crate::api::handlers::content::get_home,
        crate::api::handlers::content::get_stats,
        crate::api::handlers::content::get_knowledge,

        // Blood pressure endpoints
        crate::api::handlers::blood_pressure::interpret_blood_pressure,

        // Measurement guide endpoints
        crate::api::handlers::content::get_tutorial_steps,
        crate::api::handlers::tutorial::create_session,
        crate::api::handlers::tutorial::get_session,
        crate::api::handlers::tutorial::apply_command,
        crate::api::handlers::tutorial::report_audio_event,
        crate::api::handlers::tutorial::delete_session
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::blood_pressure::InterpretRequest,
            crate::entities::content::HomeResponse,
            crate::entities::content::KnowledgeResponse,
            crate::entities::tutorial::CommandRequest,
            crate::entities::tutorial::AudioEventRequest,
            crate::entities::tutorial::SessionResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain schemas
            pla_tong_domain::entities::RawReading,
            pla_tong_domain::entities::BpReading,
            pla_tong_domain::entities::Classification,
            pla_tong_domain::entities::BpCategory,
            pla_tong_domain::entities::BpLevel,
            pla_tong_domain::entities::StatsSnapshot,
            pla_tong_domain::entities::StatsOrigin,
            pla_tong_domain::entities::SiteStats,
            pla_tong_domain::entities::SessionSnapshot,
            pla_tong_domain::entities::TutorialPhase,
            pla_tong_domain::entities::TutorialCommand,
            pla_tong_domain::entities::AudioEvent,
            pla_tong_domain::entities::Step,

            // Content schemas
            pla_tong_data::models::AboutUs,
            pla_tong_data::models::Feature,
            pla_tong_data::models::Review,
            pla_tong_data::models::DemoSlide,
            pla_tong_data::models::UserMessage,
            pla_tong_data::models::BotMessage,
            pla_tong_data::models::LifestyleTip,
            pla_tong_data::models::ExternalLinks
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "content", description = "Home and knowledge page content"),
        (name = "blood_pressure", description = "Blood pressure interpretation"),
        (name = "tutorial", description = "Measurement guide sessions")
    ),
    info(
        title = "PlaTong API",
        version = "0.1.0",
        description = "Content, blood pressure interpretation and the measurement guide for the PlaTong site",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "PlaTong API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(tags.iter().any(|tag| tag.name == "tutorial"));

        let paths = &openapi.paths.paths;
        for path in [
            "/health",
            "/api/v1/home",
            "/api/v1/stats",
            "/api/v1/knowledge",
            "/api/v1/bloodpressure/interpret",
            "/api/v1/tutorial/steps",
            "/api/v1/tutorial/sessions",
            "/api/v1/tutorial/sessions/{id}",
            "/api/v1/tutorial/sessions/{id}/commands",
            "/api/v1/tutorial/sessions/{id}/audio-events",
        ] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_schemas_are_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("Classification"));
        assert!(schemas.contains_key("SessionSnapshot"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
