//! Common utilities used for testing the deploy scripts outside of a live chain

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod mocks;
pub mod shaman_params;
