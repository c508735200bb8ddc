#[cfg(test)]
mod blood_pressure_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

    use pla_tong_domain::entities::RawReading;
    use pla_tong_domain::services::INVALID_READING_MESSAGE;

    use crate::api::handlers::blood_pressure::interpret_blood_pressure;
    use crate::api::handlers::tests::{body_json, test_state};
    use crate::entities::blood_pressure::InterpretRequest;

    async fn interpret(systolic: RawReading, diastolic: RawReading) -> axum::response::Response {
        let request = InterpretRequest { systolic, diastolic };
        match interpret_blood_pressure(State(test_state()), Json(request)).await {
            Ok(response) => response.into_response(),
            Err(response) => response,
        }
    }

    #[tokio::test]
    async fn test_interpret_crisis_reading() {
        let response = interpret(185.into(), 95.into()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["category"]["level"], "crisis");
        assert_eq!(body["emergency"], true);
        assert!(body["emergency_advisory"].as_str().unwrap().contains("1669"));
        assert_eq!(body["reading"]["systolic"], 185);
    }

    #[tokio::test]
    async fn test_interpret_text_values() {
        let response = interpret("118".into(), " 76".into()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["category"]["level"], "normal");
        assert_eq!(body["emergency"], false);
    }

    #[tokio::test]
    async fn test_interpret_rejects_text() {
        let response = interpret("abc".into(), "80".into()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], INVALID_READING_MESSAGE);
    }

    #[tokio::test]
    async fn test_interpret_rejects_zero() {
        let response = interpret(120.into(), 0.into()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
