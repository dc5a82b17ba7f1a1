//! Service layer
//!
//! - [`HttpService`] - router assembly, in-process oneshot, listener lifecycle
//! - [`payments`] - Stripe PaymentIntents bridge
//! - [`mailer`] - best-effort SES notifications

pub mod http;
pub mod mailer;
pub mod payments;

pub use http::HttpService;
