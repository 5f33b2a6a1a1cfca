//! HTTP handlers for the Teams domain

pub mod members;
