pub(crate) const LOGIN: &str = "/login";
pub(crate) const LOGOUT: &str = "/logout";
pub(crate) const REFRESH_TOKEN: &str = "/refresh-token";

pub(crate) const USERS: &str = "/users";
pub(crate) const USERS_VERIFIED: &str = "/users/verified";
pub(crate) const USERS_ONLY_FIO: &str = "/users/only-fio";
pub(crate) const USERS_PROFILE: &str = "/users/profile";

pub(crate) const POSTS: &str = "/posts";
pub(crate) const POSTS_UPLOAD_IMAGE: &str = "/posts/upload-image";
pub(crate) const POSTS_CHANNEL: &str = "/posts/channel";

pub(crate) fn user(id: i64) -> String {
    format!("{USERS}/{id}")
}

pub(crate) fn user_stats(id: i64) -> String {
    format!("{USERS}/{id}/stats")
}

pub(crate) fn user_remove_from_channel(id: i64) -> String {
    format!("{USERS}/{id}/remove-from-channel")
}

pub(crate) fn user_posts(id: i64) -> String {
    format!("{USERS}/{id}/posts")
}

pub(crate) fn post(id: i64) -> String {
    format!("{POSTS}/{id}")
}

pub(crate) fn post_publish(id: i64) -> String {
    format!("{POSTS}/{id}/publish")
}
