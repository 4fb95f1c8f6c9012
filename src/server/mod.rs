//! TCP listener serving the codec service.

pub mod listener;
