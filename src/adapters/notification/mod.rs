//! Submission notification adapters.
//!
//! - **ResendNotifier** - emails each bundle through the Resend API
//! - **DisabledNotifier** - used when `features.email_notifications` is off

mod resend_notifier;

pub use resend_notifier::{DisabledNotifier, ResendNotifier};
