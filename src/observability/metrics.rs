//! Metrics collection.
//!
//! # Metrics
//! - `flare_routes_registered` (counter): routes compiled into scopes
//! - `flare_dispatch_total` (counter): dispatches by outcome
//! - `flare_dispatch_duration_seconds` (histogram): dispatch latency
//!
//! # Design Decisions
//! - Outcome labels reuse `ErrorKind::as_str`, plus `ok` and `handler_error`
//! - Low-overhead updates; nothing is recorded until a recorder is installed

use std::time::Duration;

use crate::dispatch::errors::DispatchError;
use crate::dispatch::scope::Dispatched;

pub fn record_routes_registered(count: usize) {
    ::metrics::counter!("flare_routes_registered").increment(count as u64);
}

pub fn record_dispatch(result: &Result<Dispatched, DispatchError>, elapsed: Duration) {
    let outcome = outcome_label(result);
    ::metrics::counter!("flare_dispatch_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("flare_dispatch_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

fn outcome_label(result: &Result<Dispatched, DispatchError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(err) => err.kind().map_or("handler_error", |kind| kind.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_outcome_labels() {
        let ok = Ok(Dispatched {
            route_path: "/a".into(),
            result: Value::Null,
        });
        assert_eq!(outcome_label(&ok), "ok");

        let not_found = Err(DispatchError::RouteNotFound {
            identifier: "x".into(),
            route_id: "x".into(),
        });
        assert_eq!(outcome_label(&not_found), "route_not_found");

        let failed = Err(DispatchError::Handler("boom".into()));
        assert_eq!(outcome_label(&failed), "handler_error");

        // No recorder installed: must be a no-op.
        record_dispatch(&failed, Duration::from_millis(3));
    }
}
