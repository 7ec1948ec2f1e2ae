//! Domain models for Hotelier.

pub mod hotel;
