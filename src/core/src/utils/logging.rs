use crate::utils::TimeEstimation;
use log::{debug, info};

const SLOW_ACTION_MS: u128 = 50;

pub struct Logging;

impl Logging {
    /// Times `action`, logging at info level when it runs slow.
    pub fn estimate_result<T, F: FnOnce() -> T>(action: F, message: &str) -> T {
        let (result, elapsed) = TimeEstimation::estimate(action);

        if elapsed > SLOW_ACTION_MS {
            info!("{}, {} ms", message, elapsed);
        } else {
            debug!("{}, {} ms", message, elapsed);
        }

        result
    }
}
