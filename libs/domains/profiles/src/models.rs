use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use validator::Validate;

/// Sex of a profile owner
///
/// Parsing is case-insensitive and treats the empty string as `Unknown`;
/// formatting is always the canonical lower-case name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sex {
    #[default]
    #[strum(to_string = "unknown", serialize = "")]
    Unknown,
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sex '{0}': only male, female or unknown are available")]
pub struct ParseSexError(pub String);

impl Sex {
    pub fn parse(value: &str) -> Result<Self, ParseSexError> {
        value
            .parse()
            .map_err(|_| ParseSexError(value.to_string()))
    }
}

impl TryFrom<String> for Sex {
    type Error = ParseSexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Sex::parse(&value)
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.to_string()
    }
}

/// A hobby attached to a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hobby {
    pub title: String,
}

impl Hobby {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Profile entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Storage-assigned identifier (empty until persisted)
    pub id: String,
    /// Owning user's identifier
    pub user_id: String,
    pub name: String,
    pub surname: String,
    pub sex: Sex,
    pub age: u8,
    pub address: String,
    pub hobbies: Vec<Hobby>,
}

/// Prefix filter for profile search; an empty prefix matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "name", default)]
    pub name_prefix: String,
    #[serde(rename = "surname", default)]
    pub surname_prefix: String,
}

impl SearchParams {
    pub fn new(name_prefix: impl Into<String>, surname_prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            surname_prefix: surname_prefix.into(),
        }
    }

    /// Whether `profile` starts with both prefixes
    pub fn matches(&self, profile: &Profile) -> bool {
        profile.name.starts_with(&self.name_prefix)
            && profile.surname.starts_with(&self.surname_prefix)
    }
}

/// Wire representation of a profile as submitted by clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfilePayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub age: u8,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
    #[serde(default)]
    pub hobbies: Vec<String>,
}

impl ProfilePayload {
    /// Convert into a not-yet-persisted profile owned by `user_id`
    pub fn into_model(self, user_id: impl Into<String>) -> Result<Profile, ParseSexError> {
        Ok(Profile {
            id: String::new(),
            user_id: user_id.into(),
            name: self.name,
            surname: self.surname,
            sex: Sex::parse(&self.sex)?,
            age: self.age,
            address: self.address,
            hobbies: self.hobbies.into_iter().map(Hobby::new).collect(),
        })
    }
}

impl From<&Profile> for ProfilePayload {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            surname: profile.surname.clone(),
            sex: profile.sex.to_string(),
            age: profile.age,
            address: profile.address.clone(),
            hobbies: profile.hobbies.iter().map(|h| h.title.clone()).collect(),
        }
    }
}

/// Profile as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub profile: ProfilePayload,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            profile: ProfilePayload::from(&profile),
            id: profile.id,
            user_id: profile.user_id,
        }
    }
}

/// Response after successful profile creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}
