//! Access to the component-analysis Report Service.
//!
//! [`ReportSource`] is the seam the orchestrator depends on; [`client::ServiceClient`]
//! implements it over HTTP with Basic authentication. Every fetch is a single
//! attempt: any failure is returned as a [`ServiceError`] and aborts the run.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::models::{Application, RawReport, ReportDescriptor};

pub use client::ServiceClient;
pub use error::{Result, ServiceError};

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// All applications, in service order. An empty list is an error.
    async fn applications(&self) -> Result<Vec<Application>>;

    /// Applications matching `public_id`; possibly empty.
    async fn applications_by_public_id(&self, public_id: &str) -> Result<Vec<Application>>;

    /// Report descriptors of one application, in service order.
    async fn reports(&self, application: &Application) -> Result<Vec<ReportDescriptor>>;

    /// Raw report payload behind a descriptor.
    async fn report_data(&self, report: &ReportDescriptor) -> Result<RawReport>;
}
