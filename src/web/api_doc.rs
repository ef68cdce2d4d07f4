use utoipa::OpenApi;

use crate::snapshot::{
    FixSnapshot, Freshness, Health, Navigation, SatelliteReading, SkyView, TaskState, TrackPoint,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::telemetry::sky,
        super::api::telemetry::fix,
        super::api::telemetry::navigation,
        super::api::telemetry::track,
        super::api::telemetry::log_status,
        super::api::telemetry::health,
    ),
    components(
        schemas(
            SatelliteReading,
            SkyView,
            FixSnapshot,
            Navigation,
            TrackPoint,
            Freshness,
            Health,
            TaskState,
        )
    ),
    info(
        title = "GNSS Dashboard API",
        description = "Latest receiver telemetry and log file status",
        version = "0.1.0"
    ),
    tags(
        (name = "telemetry", description = "Receiver snapshots")
    )
)]
pub struct ApiDoc;
