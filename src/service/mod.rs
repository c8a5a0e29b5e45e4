mod http;

pub use http::HttpPlanService;

use crate::error::Result;
use crate::models::{Plan, UserProfile};

/// Source of generated daily plans.
///
/// `nonce` is a cache-buster attached on regeneration; implementations must
/// not give it any meaning.
pub trait PlanService {
    fn generate_plan(&self, profile: &UserProfile, nonce: Option<u64>) -> Result<Plan>;
}

impl<T: PlanService + ?Sized> PlanService for &T {
    fn generate_plan(&self, profile: &UserProfile, nonce: Option<u64>) -> Result<Plan> {
        (**self).generate_plan(profile, nonce)
    }
}

impl<T: PlanService + ?Sized> PlanService for Box<T> {
    fn generate_plan(&self, profile: &UserProfile, nonce: Option<u64>) -> Result<Plan> {
        (**self).generate_plan(profile, nonce)
    }
}
