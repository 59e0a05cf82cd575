//! Checkout creation and webhook verification per payment provider.
//!
//! Each provider implements the [`PaymentProvider`] capability interface so
//! the webhook state machine stays provider-agnostic. All unlocks flow
//! through the result service.

pub mod checkout;
pub mod lemon_squeezy;
pub mod paddle;
pub mod provider;
pub mod router;

#[cfg(test)]
mod tests;

pub use checkout::CheckoutService;
pub use lemon_squeezy::LemonSqueezy;
pub use paddle::PaddleBilling;
pub use provider::{CheckoutRequest, PaymentError, PaymentProvider, WebhookEvent};
pub use router::{payment_router, PaymentGateway};
