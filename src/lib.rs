//! Core library for the unicorn-curator command line application.
//!
//! Supplier product feeds are turned into a premium furniture catalogue:
//! source adapters live under [`unicorn::furniture::source`], the curation
//! engine under [`unicorn::furniture::curate`], file adapters for the
//! product workbook and storefront catalog inside
//! [`unicorn::furniture::io`], and the orchestration used by the CLI in
//! [`unicorn::furniture::sync`].

pub mod unicorn;

pub use unicorn::furniture::{
    CurationError, Result, config, curate, error, io, logging, model, source, sync,
};
