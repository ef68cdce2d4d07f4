use axum::{extract::State, http::StatusCode, Json};

use crate::snapshot::{FixSnapshot, Freshness, Health, Navigation, SkyView, TrackPoint};
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/sky",
    responses(
        (status = 200, description = "Satellites seen since the last fix", body = SkyView)
    ),
    tag = "telemetry"
)]
pub async fn sky(State(state): State<AppState>) -> Json<SkyView> {
    Json(state.query.sky_view().as_ref().clone())
}

#[utoipa::path(
    get,
    path = "/api/fix",
    responses(
        (status = 200, description = "Latest position/velocity fix", body = FixSnapshot)
    ),
    tag = "telemetry"
)]
pub async fn fix(State(state): State<AppState>) -> Json<FixSnapshot> {
    Json(state.query.fix().as_ref().clone())
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Sky view and fix from the same cycle", body = Navigation)
    ),
    tag = "telemetry"
)]
pub async fn navigation(State(state): State<AppState>) -> Json<Navigation> {
    Json(state.query.navigation())
}

#[utoipa::path(
    get,
    path = "/api/track",
    responses(
        (status = 200, description = "Smoothed track point, null until the first fix with a position", body = Option<TrackPoint>)
    ),
    tag = "telemetry"
)]
pub async fn track(State(state): State<AppState>) -> Json<Option<TrackPoint>> {
    Json(state.query.track_point())
}

#[utoipa::path(
    get,
    path = "/api/log-status",
    responses(
        (status = 200, description = "Freshness of the monitored log file", body = Freshness)
    ),
    tag = "telemetry"
)]
pub async fn log_status(State(state): State<AppState>) -> Json<Freshness> {
    Json(state.query.log_freshness().as_ref().clone())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Telemetry is being ingested", body = Health),
        (status = 503, description = "Ingestion is not running", body = Health)
    ),
    tag = "telemetry"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let health = state.query.health();
    let status = if health.is_ingesting() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Query, SatelliteReading, SnapshotCache, TaskState};
    use std::sync::Arc;

    fn state() -> (Arc<SnapshotCache>, AppState) {
        let cache = Arc::new(SnapshotCache::new());
        let state = AppState {
            query: Query::new(cache.clone()),
        };
        (cache, state)
    }

    #[tokio::test]
    async fn empty_cache_shapes() {
        let (_, state) = state();

        let Json(fix) = fix(State(state.clone())).await;
        assert_eq!(fix, FixSnapshot::default());

        let Json(track) = track(State(state.clone())).await;
        assert_eq!(serde_json::to_value(track).unwrap(), serde_json::Value::Null);

        let Json(freshness) = log_status(State(state.clone())).await;
        assert_eq!(
            serde_json::to_value(freshness).unwrap(),
            serde_json::json!({ "state": "pending" })
        );

        let (status, _) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn sky_view_wire_format() {
        let (cache, state) = state();
        cache.publish_sky(SkyView {
            satellites: vec![SatelliteReading {
                identifier: 12,
                constellation_tag: "GPS_12".into(),
                signal_strength: 38.5,
                used_in_fix: true,
            }],
        });

        let Json(sky) = sky(State(state)).await;
        assert_eq!(
            serde_json::to_value(sky).unwrap(),
            serde_json::json!({
                "satellites": [{ "identifier": 12, "PRN": "GPS_12", "ss": 38.5, "used": true }]
            })
        );
    }

    #[tokio::test]
    async fn freshness_wire_format() {
        let (cache, state) = state();
        cache.publish_freshness(Freshness::Fresh {
            last_modified: "2024-05-01 12:00:00".into(),
            staleness_seconds: 4,
        });

        let Json(freshness) = log_status(State(state.clone())).await;
        assert_eq!(
            serde_json::to_value(freshness).unwrap(),
            serde_json::json!({
                "state": "fresh",
                "last_modified": "2024-05-01 12:00:00",
                "staleness_seconds": 4
            })
        );

        cache.publish_freshness(Freshness::FileAbsent);
        let Json(freshness) = log_status(State(state)).await;
        assert_eq!(
            serde_json::to_value(freshness).unwrap(),
            serde_json::json!({ "state": "file_absent" })
        );
    }

    #[tokio::test]
    async fn health_ok_while_ingesting() {
        let (cache, state) = state();
        cache.set_ingestion_state(TaskState::Running);
        let (status, Json(health)) = health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health.ingestion, TaskState::Running);
    }
}
