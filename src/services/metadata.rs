use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::services::simulation_types::SimulationMetadata;

pub const SIMULATION_VERSION: &str = "0.1.0-dev";
pub const RUN_ID_PREFIX: &str = "simulation";

/// Stamps a run with its bookkeeping. `duration_ms` stays empty until the
/// caller has measured the wall time.
pub fn create_simulation_metadata(iterations: usize, seed: u32) -> SimulationMetadata {
    SimulationMetadata {
        iterations,
        seed,
        generated_at: Utc::now(),
        version: SIMULATION_VERSION.to_string(),
        run_id: generate_run_id(RUN_ID_PREFIX),
        duration_ms: None,
    }
}

pub fn generate_run_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

impl SimulationMetadata {
    pub fn stamp_duration(&mut self, elapsed: Duration) {
        self.duration_ms = Some(elapsed.as_micros() as f64 / 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_carries_run_bookkeeping() {
        let metadata = create_simulation_metadata(2000, 1337);

        assert_eq!(metadata.iterations, 2000);
        assert_eq!(metadata.seed, 1337);
        assert_eq!(metadata.version, SIMULATION_VERSION);
        assert!(metadata.run_id.starts_with("simulation-"));
        assert_eq!(metadata.duration_ms, None);
    }

    #[test]
    fn run_ids_are_unique() {
        let first = generate_run_id("simulation");
        let second = generate_run_id("simulation");
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.trim_start_matches("simulation-")).is_ok());
    }

    #[test]
    fn stamp_duration_records_milliseconds() {
        let mut metadata = create_simulation_metadata(100, 1);
        metadata.stamp_duration(Duration::from_micros(2500));
        assert_eq!(metadata.duration_ms, Some(2.5));
    }
}
