//! HTTP tests for the claims API
//!
//! The router runs against the in-memory adapters; requests go through the
//! full middleware stack with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use core_kernel::ClaimId;
use domain_claims::ports::mock::MockClaimStore;
use domain_claims::{ApplicationUser, ClaimStatus};
use interface_api::{auth::create_token, config::ApiConfig, create_router};
use test_utils::{DocumentFixtures, NewClaimBuilder, ServiceHarness, UserFixtures};

const BOUNDARY: &str = "claims-test-boundary";

struct TestApp {
    harness: ServiceHarness,
    router: Router,
    config: ApiConfig,
}

impl TestApp {
    fn new() -> Self {
        Self::with_store(MockClaimStore::new())
    }

    fn with_store(store: MockClaimStore) -> Self {
        let harness = ServiceHarness::with_store(store);
        let config = ApiConfig {
            jwt_secret: "api-test-secret".to_string(),
            ..ApiConfig::default()
        };
        let router = create_router(harness.service.clone(), config.clone());
        Self { harness, router, config }
    }

    fn token(&self, user: &ApplicationUser) -> String {
        create_token(&user.id, user.role, &self.config.jwt_secret, 300).unwrap()
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, user: &ApplicationUser) -> Response {
        let request = Request::get(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post(&self, uri: &str, user: &ApplicationUser) -> Response {
        let request = Request::post(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn submit(&self, user: &ApplicationUser, parts: &[Part<'_>]) -> Response {
        let request = Request::post("/api/v1/claims")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    /// Submits a valid claim for the default lecturer through the service
    async fn seed_claim(&self) -> ClaimId {
        self.harness
            .service
            .create_claim(NewClaimBuilder::new().build(), Some(DocumentFixtures::pdf()))
            .await
            .unwrap()
    }

    async fn status_of(&self, id: ClaimId) -> ClaimStatus {
        self.harness
            .service
            .get_claim_by_id(id)
            .await
            .unwrap()
            .unwrap()
            .status
    }
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        content: Vec<u8>,
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n", name, value)
                        .as_bytes(),
                );
            }
            Part::File { name, file_name, content_type, content } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn pdf_part(content: Vec<u8>) -> Part<'static> {
    Part::File {
        name: "document",
        file_name: "timesheet.pdf",
        content_type: "application/pdf",
        content,
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Health and authentication
// ============================================================================

mod health_and_auth {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::new();
        let response = app
            .send(Request::get("/health").body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_claim_store() {
        let app = TestApp::new();
        let response = app
            .send(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["claim_store"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = TestApp::new();
        let response = app
            .send(Request::get("/api/v1/claims").body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_foreign_token_is_unauthorized() {
        let app = TestApp::new();
        let lecturer = UserFixtures::lecturer();
        let token = create_token(&lecturer.id, lecturer.role, "someone-else", 300).unwrap();
        let request = Request::get("/api/v1/claims")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        assert_eq!(app.send(request).await.status(), StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Claim submission
// ============================================================================

mod submission {
    use super::*;

    #[tokio::test]
    async fn test_lecturer_submits_claim() {
        let app = TestApp::new();
        let lecturer = UserFixtures::lecturer();

        let response = app
            .submit(
                &lecturer,
                &[
                    Part::Text("hours_worked", "10"),
                    Part::Text("hourly_rate", "500"),
                    Part::Text("notes", "March tutorials"),
                    pdf_part(vec![b'%'; 1024]),
                ],
            )
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/claims");
        let flash = json_body(response).await;
        assert!(flash["success_message"].as_str().unwrap().contains("CLM-1"));

        let listed = json_body(app.get("/api/v1/claims", &lecturer).await).await;
        let claims = listed.as_array().unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0]["status"], "PendingReview");
        assert_eq!(claims[0]["lecturer_name"], "John Doe");
        assert_eq!(claims[0]["total_payment"], "5000.00");
        assert_eq!(claims[0]["notes"], "March tutorials");
    }

    #[tokio::test]
    async fn test_missing_document_is_unprocessable() {
        let app = TestApp::new();
        let response = app
            .submit(
                &UserFixtures::lecturer(),
                &[Part::Text("hours_worked", "10"), Part::Text("hourly_rate", "500")],
            )
            .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "A supporting document is required");
        assert!(app.harness.claims.is_empty().await);
    }

    #[tokio::test]
    async fn test_executable_is_rejected() {
        let app = TestApp::new();
        let response = app
            .submit(
                &UserFixtures::lecturer(),
                &[
                    Part::Text("hours_worked", "10"),
                    Part::Text("hourly_rate", "500"),
                    Part::File {
                        name: "document",
                        file_name: "test.exe",
                        content_type: "application/exe",
                        content: vec![0; 1024],
                    },
                ],
            )
            .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("Invalid file type"));
        assert!(app.harness.documents.is_empty().await);
    }

    #[tokio::test]
    async fn test_oversized_document_reaches_validator() {
        let app = TestApp::new();
        let response = app
            .submit(
                &UserFixtures::lecturer(),
                &[
                    Part::Text("hours_worked", "10"),
                    Part::Text("hourly_rate", "500"),
                    pdf_part(vec![0; 6 * 1024 * 1024]),
                ],
            )
            .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["message"], "File size must not exceed 5MB");
    }

    #[tokio::test]
    async fn test_form_bounds() {
        let app = TestApp::new();
        let lecturer = UserFixtures::lecturer();

        let cases = [
            ("0", "500"),
            ("800", "500"),
            ("79228162514264337593543950335", "500"),
            ("7.125", "500"),
            ("10", "0"),
            ("10", "100000.01"),
            ("ten", "500"),
            ("", "500"),
        ];
        for (hours, rate) in cases {
            let response = app
                .submit(
                    &lecturer,
                    &[
                        Part::Text("hours_worked", hours),
                        Part::Text("hourly_rate", rate),
                        pdf_part(vec![1; 10]),
                    ],
                )
                .await;
            assert_eq!(
                response.status(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "hours={hours} rate={rate}"
            );
        }
        assert!(app.harness.claims.is_empty().await);
    }

    #[tokio::test]
    async fn test_hours_precision_message() {
        let app = TestApp::new();
        let response = app
            .submit(
                &UserFixtures::lecturer(),
                &[
                    Part::Text("hours_worked", "7.125"),
                    Part::Text("hourly_rate", "500"),
                    pdf_part(vec![1; 10]),
                ],
            )
            .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await["message"],
            "Hours worked must have at most 2 decimal places"
        );
    }

    #[tokio::test]
    async fn test_reviewers_cannot_submit() {
        let app = TestApp::new();
        let response = app
            .submit(
                &UserFixtures::coordinator(),
                &[
                    Part::Text("hours_worked", "10"),
                    Part::Text("hourly_rate", "500"),
                    pdf_part(vec![1; 10]),
                ],
            )
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

// ============================================================================
// Viewing claims
// ============================================================================

mod viewing {
    use super::*;

    #[tokio::test]
    async fn test_owner_sees_details() {
        let app = TestApp::new();
        let id = app.seed_claim().await;

        let response = app
            .get(&format!("/api/v1/claims/{}", id.value()), &UserFixtures::lecturer())
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["id"], id.value());
        assert_eq!(body["claim_number"], id.to_string());
        assert_eq!(body["document_name"], "timesheet.pdf");
    }

    #[tokio::test]
    async fn test_unknown_claim_redirects_home() {
        let app = TestApp::new();
        let response = app.get("/api/v1/claims/999", &UserFixtures::coordinator()).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(json_body(response).await["error_message"], "Claim not found");
    }

    #[tokio::test]
    async fn test_claim_number_is_accepted_as_id() {
        let app = TestApp::new();
        let id = app.seed_claim().await;

        let response = app
            .get(&format!("/api/v1/claims/{}", id), &UserFixtures::lecturer())
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], id.value());
    }

    #[tokio::test]
    async fn test_malformed_id_is_a_json_bad_request() {
        let app = TestApp::new();

        for uri in ["/api/v1/claims/abc", "/api/v1/claims/0", "/api/v1/claims/CLM-x"] {
            let response = app.get(uri, &UserFixtures::coordinator()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = json_body(response).await;
            assert_eq!(body["error"], "bad_request");
        }

        let response = app.post("/api/v1/claims/abc/verify", &UserFixtures::coordinator()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_other_lecturers_claim_is_hidden() {
        let app = TestApp::new();
        let id = app.seed_claim().await;

        let response = app
            .get(&format!("/api/v1/claims/{}", id.value()), &UserFixtures::other_lecturer())
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_reviewer_index_is_their_queue() {
        let app = TestApp::new();
        let first = app.seed_claim().await;
        app.seed_claim().await;
        app.harness
            .service
            .update_claim_status(first, ClaimStatus::VerifiedByCoordinator)
            .await
            .unwrap();

        let coordinator = json_body(app.get("/api/v1/claims", &UserFixtures::coordinator()).await).await;
        let manager = json_body(app.get("/api/v1/claims", &UserFixtures::manager()).await).await;

        assert_eq!(coordinator.as_array().unwrap().len(), 1);
        assert_eq!(manager.as_array().unwrap().len(), 1);
        assert_eq!(manager[0]["id"], first.value());
    }
}

// ============================================================================
// Review actions
// ============================================================================

mod review {
    use super::*;

    #[tokio::test]
    async fn test_verify_then_approve() {
        let app = TestApp::new();
        let id = app.seed_claim().await;

        let response = app
            .post(&format!("/api/v1/claims/{}/verify", id.value()), &UserFixtures::coordinator())
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/dashboard/coordinator");
        assert!(json_body(response).await["success_message"].is_string());
        assert_eq!(app.status_of(id).await, ClaimStatus::VerifiedByCoordinator);

        let response = app
            .post(&format!("/api/v1/claims/{}/approve", id.value()), &UserFixtures::manager())
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/dashboard/manager");
        assert_eq!(app.status_of(id).await, ClaimStatus::ApprovedByManager);
    }

    #[tokio::test]
    async fn test_reject_returns_to_reviewers_dashboard() {
        let app = TestApp::new();
        let by_coordinator = app.seed_claim().await;
        let by_manager = app.seed_claim().await;
        app.harness
            .service
            .update_claim_status(by_manager, ClaimStatus::VerifiedByCoordinator)
            .await
            .unwrap();

        let response = app
            .post(
                &format!("/api/v1/claims/{}/reject", by_coordinator.value()),
                &UserFixtures::coordinator(),
            )
            .await;
        assert_eq!(location(&response), "/api/v1/dashboard/coordinator");

        let response = app
            .post(&format!("/api/v1/claims/{}/reject", by_manager.value()), &UserFixtures::manager())
            .await;
        assert_eq!(location(&response), "/api/v1/dashboard/manager");

        assert_eq!(app.status_of(by_coordinator).await, ClaimStatus::Rejected);
        assert_eq!(app.status_of(by_manager).await, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let app = TestApp::new();
        let id = app.seed_claim().await;

        let cases = [
            ("verify", UserFixtures::manager()),
            ("approve", UserFixtures::coordinator()),
            ("reject", UserFixtures::lecturer()),
        ];
        for (action, user) in cases {
            let response = app
                .post(&format!("/api/v1/claims/{}/{}", id.value(), action), &user)
                .await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{action}");
        }
        assert_eq!(app.status_of(id).await, ClaimStatus::PendingReview);
    }

    #[tokio::test]
    async fn test_approving_unverified_claim_flashes_error() {
        let app = TestApp::new();
        let id = app.seed_claim().await;

        let response = app
            .post(&format!("/api/v1/claims/{}/approve", id.value()), &UserFixtures::manager())
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/dashboard/manager");
        assert!(json_body(response).await["error_message"].is_string());
        assert_eq!(app.status_of(id).await, ClaimStatus::PendingReview);
    }

    #[tokio::test]
    async fn test_losing_a_review_race_flashes_error() {
        let app = TestApp::with_store(MockClaimStore::racing(ClaimStatus::Rejected));
        let id = app.seed_claim().await;

        let response = app
            .post(&format!("/api/v1/claims/{}/verify", id.value()), &UserFixtures::coordinator())
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/api/v1/dashboard/coordinator");
        let flash = json_body(response).await;
        assert_eq!(
            flash["error_message"],
            format!("Claim {} was modified by another reviewer", id)
        );
        assert_eq!(app.status_of(id).await, ClaimStatus::Rejected);
    }

    #[tokio::test]
    async fn test_reviewing_unknown_claim_flashes_not_found() {
        let app = TestApp::new();
        let response = app.post("/api/v1/claims/42/verify", &UserFixtures::coordinator()).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(json_body(response).await["error_message"], "Claim not found");
    }
}

// ============================================================================
// Dashboards
// ============================================================================

mod dashboards {
    use super::*;

    #[tokio::test]
    async fn test_coordinator_dashboard() {
        let app = TestApp::new();
        let id = app.seed_claim().await;
        app.seed_claim().await;
        app.harness
            .service
            .update_claim_status(id, ClaimStatus::Rejected)
            .await
            .unwrap();

        let response = app.get("/api/v1/dashboard/coordinator", &UserFixtures::coordinator()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["role"], "Coordinator");
        assert_eq!(body["summary"]["total"], 2);
        assert_eq!(body["summary"]["pending_review"], 1);
        assert_eq!(body["summary"]["rejected"], 1);
        assert_eq!(body["queue"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dashboards_are_role_restricted() {
        let app = TestApp::new();

        let response = app.get("/api/v1/dashboard/manager", &UserFixtures::coordinator()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app.get("/api/v1/dashboard/coordinator", &UserFixtures::lecturer()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
