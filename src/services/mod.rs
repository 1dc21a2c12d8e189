//! # External Collaborator Seams
//!
//! Object-safe async traits for the two stateless services the pipeline
//! calls out to. Both are black boxes that may fail with any error, so their
//! failure type is the opaque [`anyhow::Error`] and every call is wrapped at
//! the stage boundary.

pub mod generation_gateway;
pub mod product_registrar;

pub use generation_gateway::{GeneratedArtifact, GenerationGateway, GenerationRequest};
pub use product_registrar::{
    ProductMetadata, ProductRegistrar, RegisteredProducts, RegistrationRequest,
};
