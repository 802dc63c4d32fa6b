//! Benchmark government yields for seeding the current rate of a simulation.
//!
//! Quotes are plain data handed to the engine through
//! [`rate_provider::seed_current_rate`]; no pricing function ever calls a
//! provider itself.

pub mod rate_provider;

pub use rate_provider::{
    seed_current_rate, Benchmark, Country, RateProvider, RateQuote, StaticRateProvider,
};
