//! Membership services: mutations behind the authorization gate, and listings

pub mod mutator;
pub mod reader;

pub use mutator::{AddMember, MemberOperation, MembershipMutator};
pub use reader::MembershipReader;
