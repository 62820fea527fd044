use crate::{
    doc::ApiDoc,
    routes::{accommodation, available_term, health, price, reserved_term},
    state::AppState,
};
use axum::{
    Router,
    http::{HeaderValue, Method, header, header::InvalidHeaderValue},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Allows the single configured front-end origin
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/accommodation",
            post(accommodation::create_accommodation),
        )
        .route(
            "/api/accommodation/search",
            post(accommodation::search_accommodations),
        )
        .route(
            "/api/accommodation/{id}",
            get(accommodation::get_accommodation_by_id),
        )
        .route(
            "/api/accommodation/{id}/accept-reservation-type",
            put(accommodation::update_accept_reservation_type),
        )
        .route(
            "/api/accommodation/for-host/{hostId}",
            get(accommodation::get_host_accommodations)
                .delete(accommodation::delete_host_accommodations),
        )
        .route("/api/accommodation/price", post(price::create_prices))
        .route(
            "/api/accommodation/price/{id}",
            put(price::update_price).delete(price::delete_price),
        )
        .route("/api/accommodation/{id}/prices", get(price::list_prices))
        .route(
            "/api/accommodation/available-term",
            post(available_term::create_available_terms),
        )
        .route(
            "/api/accommodation/available-term/{id}",
            put(available_term::update_available_term)
                .delete(available_term::delete_available_term),
        )
        .route(
            "/api/accommodation/{id}/available-terms",
            get(available_term::list_available_terms),
        )
        .route(
            "/api/accommodation/reserved-term",
            post(reserved_term::create_reserved_term),
        )
        .route(
            "/api/accommodation/reserved-term/{id}",
            put(reserved_term::update_reserved_term).delete(reserved_term::delete_reserved_term),
        )
        .route(
            "/api/accommodation/{id}/reserved-terms",
            get(reserved_term::list_reserved_terms),
        );

    Router::new()
        .route("/probe/liveness", get(health::liveness))
        .route("/probe/readiness", get(health::readiness))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use database::{InMemoryTermStore, services::seed_store};
    use identity::{IdentityError, IdentityProvider};
    use models::{
        accommodation::Accommodation,
        user::{AuthenticatedUser, UserRole},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    const HOST: &str = "Bearer host-1";
    const OTHER_HOST: &str = "Bearer host-2";
    const GUEST: &str = "Bearer guest";
    const OUTAGE: &str = "Bearer outage";

    struct StubIdentity;

    #[async_trait]
    impl IdentityProvider for StubIdentity {
        async fn authorize_host(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
            let (id, role) = match token {
                HOST => (1, UserRole::Host),
                OTHER_HOST => (2, UserRole::Host),
                GUEST => (3, UserRole::Guest),
                OUTAGE => return Err(IdentityError::Unavailable("connection refused".into())),
                _ => return Err(IdentityError::Unauthorized("Invalid token".into())),
            };
            Ok(AuthenticatedUser { id, role })
        }
    }

    async fn seeded_app() -> (Router, Vec<Accommodation>) {
        let store = InMemoryTermStore::new();
        let seeded = seed_store(&store).await.unwrap();

        let state = AppState::new(Arc::new(store), Arc::new(StubIdentity));
        let app = router(state, cors_layer("http://localhost:3005").unwrap());
        (app, seeded)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn search_body(guests: u32) -> Value {
        json!({
            "address": "novi sad",
            "numberOfGuests": guests,
            "startDate": "2023-06-01T10:00:00Z",
            "endDate": "2023-06-04T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_probes() {
        let (app, _) = seeded_app().await;

        let (status, _) = send(&app, Method::GET, "/probe/liveness", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, "/probe/readiness", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_quotes_prices() {
        let (app, _) = seeded_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/search",
            None,
            Some(search_body(4)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let results = body.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["accommodation"]["name"], "Vila Marija");
        assert_eq!(results[0]["numberOfGuests"], 4);
        assert_eq!(results[0]["basePrice"], 5000.0);
        assert_eq!(results[0]["totalPrice"], 60000);
        assert_eq!(results[1]["accommodation"]["images"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_rejects_reversed_range() {
        let (app, _) = seeded_app().await;
        let mut body = search_body(4);
        body["endDate"] = json!("2023-05-01T10:00:00Z");

        let (status, body) =
            send(&app, Method::POST, "/api/accommodation/search", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_malformed_input_gets_error_body() {
        let (app, _) = seeded_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/search",
            None,
            Some(json!({ "address": "novi sad" })),
        )
        .await;
        assert!(status.is_client_error());
        assert_eq!(body["statusCode"], status.as_u16());

        let (status, body) = send(&app, Method::GET, "/api/accommodation/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (app, seeded) = seeded_app().await;

        let uri = format!("/api/accommodation/{}", seeded[0].id);
        let (status, body) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Vila Marija");
        assert_eq!(body["acceptReservationType"], "MANUAL");
        assert!(body["availableTerms"].is_array());

        let (again_status, again) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(again_status, StatusCode::OK);
        assert_eq!(again, body);

        let (status, body) = send(&app, Method::GET, "/api/accommodation/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "Accommodation 999 does not exist");
    }

    #[tokio::test]
    async fn test_accept_reservation_type_statuses() {
        let (app, seeded) = seeded_app().await;
        let uri = format!("/api/accommodation/{}/accept-reservation-type", seeded[0].id);
        let automatic = json!({ "acceptReservationType": "AUTOMATIC" });

        let (status, _) = send(&app, Method::PUT, &uri, None, Some(automatic.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            Method::PUT,
            &uri,
            Some(HOST),
            Some(json!({ "acceptReservationType": "INVALID" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for (token, expected) in [
            (GUEST, StatusCode::UNAUTHORIZED),
            (OTHER_HOST, StatusCode::UNAUTHORIZED),
            ("Bearer forged", StatusCode::UNAUTHORIZED),
            (OUTAGE, StatusCode::BAD_GATEWAY),
        ] {
            let (status, body) =
                send(&app, Method::PUT, &uri, Some(token), Some(automatic.clone())).await;
            assert_eq!(status, expected, "token {token}");
            assert_eq!(body["statusCode"], expected.as_u16());
        }

        let details_uri = format!("/api/accommodation/{}", seeded[0].id);
        let (status, body) = send(&app, Method::GET, &details_uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["acceptReservationType"], "MANUAL");

        let (status, body) = send(&app, Method::PUT, &uri, Some(HOST), Some(automatic)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["acceptReservationType"], "AUTOMATIC");
        assert_eq!(body["images"].as_array().unwrap().len(), 3);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/accommodation/999/accept-reservation-type",
            Some(HOST),
            Some(json!({ "acceptReservationType": "MANUAL" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reserved_term_hides_listing_from_search() {
        let (app, seeded) = seeded_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/reserved-term",
            None,
            Some(json!({
                "accommodationId": seeded[0].id,
                "startDate": "2023-06-02T10:00:00Z",
                "endDate": "2023-06-03T10:00:00Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let term_id = body["id"].as_i64().unwrap();

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/search",
            None,
            Some(search_body(4)),
        )
        .await;
        let results = body.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["accommodation"]["name"], "Lanterna");

        let uri = format!("/api/accommodation/reserved-term/{term_id}");
        let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_price_lifecycle() {
        let (app, seeded) = seeded_app().await;
        let lanterna = seeded[1].id;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/price",
            Some(HOST),
            Some(json!([{
                "accommodationId": lanterna,
                "value": 4200.0,
                "priceDuration": "WEEKEND",
                "startDate": "2023-06-01T10:00:00Z",
                "endDate": "2023-06-30T10:00:00Z"
            }])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body[0]["active"], true);
        let price_id = body[0]["id"].as_i64().unwrap();

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/search",
            None,
            Some(search_body(4)),
        )
        .await;
        assert_eq!(body[1]["basePrice"], 4200.0);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/accommodation/price/{price_id}"),
            Some(HOST),
            Some(json!({
                "value": 4000.0,
                "startDate": "2023-06-01T10:00:00Z",
                "endDate": "2023-06-30T10:00:00Z",
                "active": false
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["priceDuration"], "WEEKEND");
        assert_eq!(body["active"], false);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/accommodation/price/{price_id}"),
            Some(GUEST),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/accommodation/price/{price_id}"),
            Some(HOST),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/accommodation/{lanterna}/prices"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_available_terms_need_a_host() {
        let (app, seeded) = seeded_app().await;
        let term = json!([{
            "accommodationId": seeded[0].id,
            "startDate": "2024-02-01T10:00:00Z",
            "endDate": "2024-03-01T10:00:00Z"
        }]);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/accommodation/available-term",
            None,
            Some(term.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/accommodation/available-term",
            Some(HOST),
            Some(term),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/accommodation/{}/available-terms", seeded[0].id),
            None,
            None,
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_host_accommodations() {
        let (app, _) = seeded_app().await;

        let (status, body) =
            send(&app, Method::GET, "/api/accommodation/for-host/1", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) =
            send(&app, Method::DELETE, "/api/accommodation/for-host/1", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 2);

        let (_, body) = send(&app, Method::GET, "/api/accommodation/for-host/1", None, None).await;
        assert!(body.as_array().unwrap().is_empty());

        let (status, _) =
            send(&app, Method::DELETE, "/api/accommodation/for-host/1", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (app, _) = seeded_app().await;

        let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Accommodation API");
    }
}
