//! Client-side authentication entry flows.
//!
//! Two sibling flows, sign-up and log-in, share one architecture: a pure
//! validator, a [`gateway::ProviderGateway`] capability boundary to the
//! external identity provider, a result mapper that normalizes provider
//! payloads and classifies provider failures into user-facing messages, and a
//! flow controller per entry point that sequences validation, busy-state
//! entry, the gateway call, and result mapping.
//!
//! The crate owns no presentation: callers observe [`flow::FlowState`]
//! snapshots and render them however they like. The bundled `soglia` binary is
//! one such caller.

pub mod cli;
pub mod flow;
pub mod gateway;
pub mod identity;
pub mod messages;
pub mod validate;

/// User agent sent by the REST gateway adapter.
pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
