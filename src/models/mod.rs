pub mod country;
pub mod friend;
pub mod post;
pub mod user;
