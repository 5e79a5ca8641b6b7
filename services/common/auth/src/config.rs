/// Runtime configuration shared by token issuance and verification.
///
/// The signing secret is process-wide: loaded once at startup and never
/// rotated while the process runs.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 signing secret.
    pub secret: String,
    /// Lifetime of issued tokens in seconds.
    pub ttl_seconds: i64,
    /// Allowable clock skew in seconds when validating exp.
    pub leeway_seconds: u64,
}

pub const DEFAULT_TTL_SECONDS: i64 = 3600;

impl TokenConfig {
    /// Construct config with the reference policy: 1 hour TTL, 30s leeway.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
            leeway_seconds: 30,
        }
    }

    pub fn with_ttl(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    /// Adjust the allowed leeway.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }
}
