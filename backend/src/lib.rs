//! Community item-lending tracker backend.
//!
//! Users register, items are catalogued, users borrow available items, and
//! returning them settles a duration-based rental bill. The [`domain`]
//! module owns the entities, the catalogue and lending services, and the
//! record-store ports; [`outbound`] holds the in-memory reference adapter
//! behind those ports.

pub mod domain;
pub mod outbound;
