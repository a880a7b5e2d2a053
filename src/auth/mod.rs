pub mod guard;
pub mod token;

pub use guard::AuthUser;
pub use token::{AuthKeys, Claims};
