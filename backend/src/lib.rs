//! Facility booking backend: scheduling core plus HTTP and storage adapters.

pub mod demo_data;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::RequestId;
pub use middleware::RequestTrace;
