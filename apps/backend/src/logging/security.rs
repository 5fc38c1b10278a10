use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a rejected bearer token. `reason` is one of the `UNAUTHORIZED_*` codes.
pub fn auth_rejected(reason: &str, path: &str, detail: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason,
        path,
        detail = %Redacted(detail.unwrap_or_default()),
        "Authentication failure"
    );
}

/// Log a failed sign-in. The attempted username is not logged.
pub fn signin_failed(path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SIGNIN_FAILED",
        %trace_id,
        path,
        "Sign-in failure"
    );
}
