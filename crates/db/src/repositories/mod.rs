//! Stateless repository structs, one per aggregate.

mod activity_repo;
mod lead_repo;
mod user_repo;

pub use activity_repo::ActivityRepo;
pub use lead_repo::LeadRepo;
pub use user_repo::UserRepo;
