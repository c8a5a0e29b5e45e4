/// Upper bound (exclusive) of the underweight band.
pub const BMI_UNDERWEIGHT_MAX: f64 = 18.5;

/// Healthy BMIs at or below this are nudged toward muscle gain.
pub const BMI_LEAN_HEALTHY_MAX: f64 = 21.5;

/// Upper bound (exclusive) of the healthy band.
pub const BMI_HEALTHY_MAX: f64 = 25.0;

/// Upper bound (exclusive) of the overweight band.
pub const BMI_OVERWEIGHT_MAX: f64 = 30.0;

// ─────────────────────────────────────────────────────────────────────────────
// Service and storage defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Plan service used when neither flag nor environment names one.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Path of the plan endpoint relative to the backend URL.
pub const PLAN_ENDPOINT: &str = "/api/plan";

/// Storage key holding the single saved plan.
pub const LAST_PLAN_KEY: &str = "nutritrack:lastPlan";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
