//! # Registry Example
//!
//! Walks the engine end to end with logging enabled: installing
//! configuration, constructing values by name (exact, fuzzy and fallback),
//! constructing by type, canonical caching and batch validation.
//!
//! Run with `RUST_LOG=trace` to see cache hits and misses.

use checked_values::registry::Arg;
use checked_values::value::{Iban, Identifier, InstitutionCode};
use checked_values::{EngineConfig, ValueType};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_secs()
        .init();

    let registry = EngineConfig::default().with_sweep_interval(64).install()?;
    log::info!("Registered types: {:?}", registry.names().collect::<Vec<_>>());

    // Exact and fuzzy names resolve to the same type
    for name in ["BIC", "BIC1", "bics"] {
        let value = registry.construct(name, &[Arg::from("MARKDEFF")])?;
        log::info!("{:>6} -> {} {}", name, value.type_name(), value);
    }

    // Unknown names wrap the input as text
    let amount = registry.construct("MonetaryAmount", &[Arg::from("12.50 EUR")])?;
    log::info!("MonetaryAmount -> {} {}", amount.type_name(), amount);

    // Overloads are picked by argument kind
    let by_text = registry.construct_type::<InstitutionCode>(&[Arg::from("260140207")])?;
    let by_number = registry.construct_type::<InstitutionCode>(&[Arg::from(260_140_207_i64)])?;
    log::info!("InstitutionCode overloads agree: {}", by_text == by_number);

    // Failures name the rejected value and the type
    if let Err(error) = registry.construct("IBAN", &[Arg::from("DE00 3704 0044 0532 0130 00")]) {
        log::warn!("{}", error);
    }

    // Canonical instances
    let a = Iban::of("DE89 3704 0044 0532 0130 00")?;
    let b = Iban::of("DE89 3704 0044 0532 0130 00")?;
    log::info!("{} shared: {}", a.formatted(), Arc::ptr_eq(&a, &b));
    log::info!("IBAN parts: {}", serde_json::Value::Object(a.to_map()?));

    // Identifier text forms
    let id = Identifier::random();
    log::info!("{} <-> {} ({})", id, id.to_compact_string(), id.to_signed_integer());

    // Probe every type with the same input
    for outcome in registry.validate_all(&[Arg::from("DE136695976")]) {
        match outcome.result {
            Ok(()) => log::info!("{:<16} accepts", outcome.type_name),
            Err(error) => log::info!("{:<16} rejects: {}", outcome.type_name, error.cause()),
        }
    }

    Ok(())
}
