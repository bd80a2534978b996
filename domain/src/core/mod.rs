//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`validation::ConfigIssue`]: structured configuration findings
//! - [`text`]: term extraction shared by the stopping policy and recall ranking

pub mod error;
pub mod text;
pub mod validation;
