//! Request and response bodies for the profile endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::profile::ProfileDetails;
use crate::ports::ProfileView;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
}

/// Public profile plus the viewer's relation to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileView,
    pub website_href: Option<String>,
    pub is_following: bool,
    pub is_own_profile: bool,
}

impl From<ProfileDetails> for ProfileResponse {
    fn from(details: ProfileDetails) -> Self {
        Self {
            website_href: details.profile.website_href(),
            profile: details.profile,
            is_following: details.is_following,
            is_own_profile: details.is_own_profile,
        }
    }
}

impl ProfileResponse {
    /// The caller's own profile, as returned after an edit.
    pub fn own(profile: ProfileView) -> Self {
        Self::from(ProfileDetails {
            profile,
            is_following: false,
            is_own_profile: true,
        })
    }
}
