//! Session identity: the provider seam, the scoped store and its clock

mod clock;
mod provider;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::{HttpIdentityProvider, IdentityProvider};
pub use store::{SessionStore, SubscriptionId};

#[cfg(test)]
pub(crate) use provider::MockIdentityProvider;
