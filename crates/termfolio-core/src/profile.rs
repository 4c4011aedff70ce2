use std::collections::HashSet;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::RosterError;

const EMBEDDED_ROSTER: &str = include_str!("../assets/roster.yaml");

const PROFILE_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]*$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

/// A team member's public record. Immutable after the roster loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub vibe: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub skill_levels: Option<Vec<u8>>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub fun: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Profile {
    pub fn home(&self) -> String {
        format!("/home/{}", self.id)
    }

    pub fn location(&self) -> Option<String> {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => Some(format!("{city}, {country}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(country)) => Some(country.clone()),
            (None, None) => None,
        }
    }

    /// Skills paired with their level, when levels are known.
    pub fn leveled_skills(&self) -> Vec<(&str, Option<u8>)> {
        self.skills
            .iter()
            .enumerate()
            .map(|(idx, skill)| {
                let level = self
                    .skill_levels
                    .as_ref()
                    .and_then(|levels| levels.get(idx).copied());
                (skill.as_str(), level)
            })
            .collect()
    }
}

/// The fixed, ordered roster of profiles. The first entry is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    profiles: Vec<Profile>,
}

impl Roster {
    pub fn new(profiles: Vec<Profile>) -> Result<Self, RosterError> {
        if profiles.is_empty() {
            return Err(RosterError::Empty);
        }
        let id_pattern = Regex::new(PROFILE_ID_PATTERN)?;
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !id_pattern.is_match(&profile.id) {
                return Err(RosterError::InvalidId(profile.id.clone()));
            }
            if !seen.insert(profile.id.as_str()) {
                return Err(RosterError::DuplicateId(profile.id.clone()));
            }
            if let Some(levels) = &profile.skill_levels {
                if levels.len() != profile.skills.len() {
                    return Err(RosterError::SkillLevelMismatch {
                        id: profile.id.clone(),
                        skills: profile.skills.len(),
                        levels: levels.len(),
                    });
                }
            }
        }
        Ok(Self { profiles })
    }

    pub fn from_yaml(source: &str) -> Result<Self, RosterError> {
        let profiles: Vec<Profile> = serde_yaml::from_str(source)?;
        Self::new(profiles)
    }

    pub fn embedded() -> Result<Self, RosterError> {
        Self::from_yaml(EMBEDDED_ROSTER)
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn default_profile(&self) -> &Profile {
        &self.profiles[0]
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|profile| profile.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: format!("{id} name"),
        role: "Engineer".to_string(),
        vibe: "ships things".to_string(),
        skills: vec!["Rust".to_string(), "SQL".to_string()],
        links: vec![Link {
            label: "GitHub".to_string(),
            target: format!("https://github.com/{id}"),
        }],
        skill_levels: None,
        city: None,
        country: None,
        fun: None,
        projects: Vec::new(),
    }
}
