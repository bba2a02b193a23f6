//! Catalog-facing records consumed and produced by the engine.

/// Product records and save requests.
pub mod record;
