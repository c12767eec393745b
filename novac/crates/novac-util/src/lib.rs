//! novac-util - Foundation types shared by every compiler stage.
//!
//! This crate holds the pieces the whole pipeline agrees on: source
//! locations ([`Span`]) and the diagnostic sink ([`Handler`]). Every
//! stage reports into the same per-compilation handler; the driver
//! decides at each stage boundary whether the pipeline may continue.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::Span;
