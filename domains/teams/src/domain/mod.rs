//! Teams domain layer: entities, permission mapping, authorization, presentation

pub mod access;
pub mod avatar;
pub mod entities;
pub mod error;
pub mod guardian;
pub mod labels;
pub mod permissions;
pub mod settings;
pub mod visibility;
