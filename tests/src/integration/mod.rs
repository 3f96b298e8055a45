//! Cross-component integration tests.

pub mod concurrency;
pub mod dispatch_flows;
pub mod flows;
pub mod janitor_properties;
