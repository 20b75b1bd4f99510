//! CQRS marker traits
//!
//! Commands change stored state; queries only read it. Handlers are registered the same way
//! for both, the markers only classify request types.

/// A request that mutates state
pub trait Command: Send + 'static {}

/// A request that only reads state
pub trait Query: Send + 'static {}
