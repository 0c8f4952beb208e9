//! Client core for the AquaVia bottled-water delivery mini app.
//!
//! The crate drives the customer-facing order workflow against an external
//! backend API: it resolves the caller's identity from the host chat
//! platform's embedded session, loads reference data (saved addresses,
//! serviceable districts) through gateway ports, walks the three-step order
//! draft to a validated submission, and projects a fetched order's status
//! onto the fixed progress timeline.
//!
//! Layout follows the hexagon: [`domain`] owns entities, the draft
//! controller, the status projector, and the driven ports; [`outbound`]
//! holds the reqwest-backed REST adapter implementing those ports;
//! [`session`] resolves the host-platform session payload into an explicit
//! [`session::Session`] value that callers inject wherever the user
//! identifier is needed.

pub mod domain;
pub mod outbound;
pub mod session;
