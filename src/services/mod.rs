pub mod country_service;
pub mod friend_service;
pub mod post_service;
pub mod profile_service;
