pub mod deal_impact;
pub mod histogram;
pub mod metadata;
pub mod normalize;
pub mod percentiles;
pub mod request_file;
pub mod seeded_rng;
pub mod simulation;
pub mod simulation_api;
pub mod simulation_types;
pub mod statistics;
pub mod validation;
