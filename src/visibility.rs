//! Access rules for profiles, posts and feeds. Pure functions so the
//! policy can be checked without a database.

use crate::models::post::PostRow;
use crate::models::user::User;

/// Full profile access: the subject is public, or the viewer is the
/// subject. Friendship does not open a profile.
pub fn profile_visible(viewer_login: &str, subject: &User) -> bool {
    subject.is_public || viewer_login == subject.login
}

/// A single post: public, or the viewer wrote it.
pub fn post_visible(viewer_login: &str, post: &PostRow) -> bool {
    post.is_public || viewer_login == post.author
}

/// A user's feed: public target, the target themself, or a viewer the
/// target has added as a friend. Edges point target -> friend, so the
/// viewer having added the target counts for nothing.
pub fn feed_visible(viewer_login: &str, target: &User, target_friends: &[String]) -> bool {
    target.is_public
        || viewer_login == target.login
        || target_friends.iter().any(|login| login == viewer_login)
}
