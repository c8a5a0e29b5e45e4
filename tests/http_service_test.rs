use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use nutritrack::models::{ActivityLevel, Diet, Goal, Sex, UserProfile};
use nutritrack::service::{HttpPlanService, PlanService};
use nutritrack::NutriError;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn plan_handler(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    seen.lock().unwrap().push(body.clone());

    if body["diet"] == "Vegan" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "'weight' is required"})),
        );
    }
    if body["goal"] == "Gain Weight" {
        return (StatusCode::OK, Json(json!({"error": "no foods for this diet"})));
    }

    (
        StatusCode::OK,
        Json(json!({
            "tdee": 2480.5,
            "macros": {"protein_g": 98.0, "carbs_g": 261.1, "fats_g": 58.0},
            "plan": {
                "meals": [
                    {"meal": "Breakfast", "items": ["Eggs (2)"], "calories": 155,
                     "options": [
                        {"items": ["Eggs (2)"], "calories": 155},
                        {"items": ["Greek Yogurt (200g)", "Banana"], "calories": 251}
                     ]},
                    {"meal": "Snack", "items": ["Apple"], "calories": 95}
                ],
                "total_calories": 250
            }
        })),
    )
}

/// Serve the plan endpoint on an ephemeral port from a background thread.
fn spawn_backend() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/api/plan", post(plan_handler))
        .with_state(seen.clone());

    let rt = tokio::runtime::Runtime::new().unwrap();
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        rt.block_on(async move { axum::serve(listener, app).await.unwrap() });
    });

    (format!("http://{}", addr), seen)
}

fn profile() -> UserProfile {
    UserProfile {
        sex: Sex::Female,
        age: 34,
        height: 168.0,
        weight: 61.5,
        activity: ActivityLevel::VeryActive,
        goal: Goal::GainMuscle,
        diet: Diet::NonVegetarian,
    }
}

fn service(base: &str) -> HttpPlanService {
    HttpPlanService::new(base, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_fetches_and_normalizes_plan() {
    let (base, seen) = spawn_backend();
    let plan = service(&base).generate_plan(&profile(), Some(1234)).unwrap();

    assert_eq!(plan.tdee, 2480.5);
    assert_eq!(plan.slots.len(), 2);
    assert_eq!(plan.slots[0].options().len(), 2);
    assert_eq!(plan.slots[1].options()[0].calories, 95.0);
    assert_eq!(plan.total_calories(&[1, 0]), 346.0);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["age"], 34);
    assert_eq!(seen[0]["weight"], 61.5);
    assert_eq!(seen[0]["activity"], "Very Active");
    assert_eq!(seen[0]["_t"], 1234);
}

#[test]
fn test_error_status_surfaces_service_message() {
    let (base, _) = spawn_backend();
    let mut vegan = profile();
    vegan.diet = Diet::Vegan;

    match service(&base).generate_plan(&vegan, None) {
        Err(NutriError::Transport { status, message }) => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "'weight' is required");
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn test_error_field_on_success_is_domain_error() {
    let (base, _) = spawn_backend();
    let mut gaining = profile();
    gaining.goal = Goal::GainWeight;

    let err = service(&base).generate_plan(&gaining, None).unwrap_err();
    assert!(matches!(err, NutriError::Domain(msg) if msg == "no foods for this diet"));
}

#[test]
fn test_unknown_route_is_transport_error() {
    let (base, _) = spawn_backend();
    let err = service(&format!("{}/missing", base))
        .generate_plan(&profile(), None)
        .unwrap_err();
    assert!(matches!(err, NutriError::Transport { status: Some(404), .. }));
}

#[test]
fn test_unreachable_backend_is_transport_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let err = service(&format!("http://127.0.0.1:{}", port))
        .generate_plan(&profile(), None)
        .unwrap_err();
    assert!(matches!(err, NutriError::Transport { status: None, .. }));
}
