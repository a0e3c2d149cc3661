//! The premium curation engine.
//!
//! Raw records flow one way: [`fields`] resolves cost and images,
//! [`quality`] accepts or rejects, then [`naming`], [`pricing`],
//! [`images`], [`badge`] and [`description`] build the curated record.
//! [`curator`] runs the whole batch.

pub mod badge;
pub mod curator;
pub mod description;
pub mod fields;
pub mod images;
pub mod naming;
pub mod passthrough;
pub mod pricing;
pub mod quality;

pub use curator::{Curation, CurationReport, Curator};
pub use naming::NameTransformer;
pub use passthrough::passthrough;
pub use pricing::PricePositioner;
pub use quality::QualityGate;
