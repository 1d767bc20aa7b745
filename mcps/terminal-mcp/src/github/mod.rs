//! GitHub REST API wrapper
//!
//! [`GitHubClient`] issues authenticated requests against the REST API and
//! reports every failure through [`GitHubError`].

pub mod client;
pub mod error;

pub use client::{ApiResponse, ContentUpload, GitHubClient};
pub use error::{GitHubError, GitHubResult};
