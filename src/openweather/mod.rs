pub mod client;
pub mod models;

pub use client::AirPollutionClient;
pub use models::{AirPollutionResponse, Coordinates, MainIndex, PollutionEntry};

use std::future::Future;

use crate::backfill::Window;
use crate::error::AppResult;

/// Anything that can answer an hourly air-pollution history query.
///
/// The backfill runner is generic over this so it can be driven by a canned
/// source in tests.
pub trait AirPollutionSource {
    fn fetch_history(
        &self,
        window: &Window,
    ) -> impl Future<Output = AppResult<AirPollutionResponse>> + Send;
}

impl<T: AirPollutionSource + Sync> AirPollutionSource for &T {
    fn fetch_history(
        &self,
        window: &Window,
    ) -> impl Future<Output = AppResult<AirPollutionResponse>> + Send {
        (**self).fetch_history(window)
    }
}
