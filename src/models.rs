//! Public Twine models.
//!
//! Models are organized into domain-specific submodules (e.g.,
//! `turbomachinery`) based on an opinionated taxonomy.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation lives. The `core` module is an implementation
//! detail; its input, output and error types are re-exported by the model.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that delegates
//! to the model-specific core API.

pub mod turbomachinery;
