//! Offline delivery controller for PWA-style app shells.
//!
//! This crate ties the pieces together:
//! - `DeliveryController` - install/activate lifecycle, strategy-routed
//!   fetch handling, skip-waiting updates, push presentation
//! - `ClientRegistry` / `NotificationPresenter` - host surfaces the
//!   controller drives
//! - `EventOutcome` - what a dispatched event hands back to the host

mod controller;
mod host;
mod notify;

pub use controller::*;
pub use host::*;
pub use notify::*;
