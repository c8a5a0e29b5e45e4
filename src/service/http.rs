use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{NutriError, Result};
use crate::models::{Plan, PlanResponse, UserProfile};
use crate::planner::constants::PLAN_ENDPOINT;
use crate::service::PlanService;

#[derive(Serialize)]
struct PlanRequest<'a> {
    #[serde(flatten)]
    profile: &'a UserProfile,
    #[serde(rename = "_t", skip_serializing_if = "Option::is_none")]
    nonce: Option<u64>,
}

/// Blocking client for the remote plan endpoint.
///
/// Requests run on a private single-threaded runtime.
pub struct HttpPlanService {
    client: reqwest::Client,
    rt: tokio::runtime::Runtime,
    endpoint: String,
}

impl HttpPlanService {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("nutritrack/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let endpoint = format!("{}{}", backend_url.trim_end_matches('/'), PLAN_ENDPOINT);

        Ok(Self {
            client,
            rt,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn generate_plan_async(
        &self,
        profile: &UserProfile,
        nonce: Option<u64>,
    ) -> Result<Plan> {
        debug!(endpoint = %self.endpoint, ?nonce, "requesting plan");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&PlanRequest { profile, nonce })
            .send()
            .await
            .map_err(|e| NutriError::Transport {
                status: None,
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            // The service reports its own failures as `{"error": ...}` with a 4xx/5xx.
            let message = resp
                .json::<PlanResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "plan request failed");
            return Err(NutriError::status(status.as_u16(), message));
        }

        let body: PlanResponse = resp
            .json()
            .await
            .map_err(|e| NutriError::InvalidResponse(e.to_string()))?;
        let plan = body.into_plan()?;

        info!(slots = plan.slots.len(), tdee = plan.tdee, "received plan");
        Ok(plan)
    }
}

impl PlanService for HttpPlanService {
    fn generate_plan(&self, profile: &UserProfile, nonce: Option<u64>) -> Result<Plan> {
        self.rt.block_on(self.generate_plan_async(profile, nonce))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Diet, Goal, Sex};

    fn profile() -> UserProfile {
        UserProfile {
            sex: Sex::Female,
            age: 28,
            height: 165.0,
            weight: 58.5,
            activity: ActivityLevel::SomeMovement,
            goal: Goal::GainMuscle,
            diet: Diet::Vegan,
        }
    }

    #[test]
    fn test_request_body_flattens_profile() {
        let p = profile();
        let body = serde_json::to_value(PlanRequest {
            profile: &p,
            nonce: Some(42),
        })
        .unwrap();
        assert_eq!(body["sex"], "Female");
        assert_eq!(body["height"], 165.0);
        assert_eq!(body["_t"], 42);

        let body = serde_json::to_value(PlanRequest {
            profile: &p,
            nonce: None,
        })
        .unwrap();
        assert!(body.get("_t").is_none());
    }

    #[test]
    fn test_endpoint_joins_trailing_slash() {
        let service = HttpPlanService::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.endpoint(), "http://localhost:5000/api/plan");
    }
}
