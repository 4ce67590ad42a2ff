//! MeshDeploy Provisioning
//!
//! This crate turns a compiled deployment plan into an ordered list of
//! provisioning actions and hands them to a backend.
//!
//! # Backends
//!
//! - **Dry run**: records calls in memory, used by `meshdeploy plan` and tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 MeshDeploy CLI                   │
//! │                 (synth / plan)                   │
//! └─────────────────┬───────────────────────────────┘
//!                   │ DeploymentPlan
//! ┌─────────────────▼───────────────────────────────┐
//! │               meshdeploy-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   ActionPlan (virtual node → task def     │   │
//! │  │   → service → scaling policy)             │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   trait ProvisioningBackend { ... }       │   │
//! │  └──────────────────────────────────────────┘   │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │    dry-run    │
//! │    backend    │
//! └───────────────┘
//! ```

pub mod action;
pub mod dry_run;
pub mod error;
pub mod provider;

#[cfg(test)]
mod testing;

// Re-exports
pub use action::{
    Action, ActionPlan, ActionResult, ActionType, ApplyResult, PlanSummary, ResourceKind,
};
pub use dry_run::{DryRunBackend, RecordedCall};
pub use error::{CloudError, Result};
pub use provider::{ApplyOptions, ProvisioningBackend, apply};
