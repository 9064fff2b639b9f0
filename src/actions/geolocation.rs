use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::session::Coordinate;

#[derive(Debug, Error)]
#[error("position unavailable: {0}")]
pub struct PositionUnavailable(pub String);

/// Source of position fixes, e.g. the device location service.
pub trait Geolocator: Send + Sync {
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate, PositionUnavailable>>;
}
