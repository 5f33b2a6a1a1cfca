//! Avatar links derived from member emails

use md5::{Digest, Md5};

/// Where avatar links point to
#[derive(Debug, Clone, Default)]
pub struct AvatarSettings {
    /// URL prefix the application is served under, without trailing slash
    pub app_sub_url: String,
    pub disable_gravatar: bool,
}

impl AvatarSettings {
    /// Avatar URL for an email address.
    ///
    /// The hash is the Gravatar one, md5 of the lowercased email, which the
    /// `/avatar/{hash}` proxy resolves. Members without an email get no URL.
    pub fn avatar_url(&self, email: &str) -> String {
        if self.disable_gravatar {
            return format!("{}/public/img/user_profile.png", self.app_sub_url);
        }
        if email.is_empty() {
            return String::new();
        }

        let digest = Md5::digest(email.to_lowercase().as_bytes());
        format!("{}/avatar/{}", self.app_sub_url, hex::encode(digest))
    }
}
