//! Core domain types for JobPulse.

use serde::{Deserialize, Deserializer, Serialize};

/// Fixed storage key of the master profile.
pub const PROFILE_KEY: &str = "jobpulse_master_profile";

/// Default file name used when exporting the profile.
pub const PROFILE_EXPORT_FILE: &str = "mon_profil_jobpulse.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: String,
    pub application_type: ApplicationType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    #[default]
    Alternance,
    Stage,
}

impl ApplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::Alternance => "alternance",
            ApplicationType::Stage => "stage",
        }
    }

    /// Contract wording the generated documents must mention verbatim.
    pub fn contract_phrase(&self) -> &'static str {
        match self {
            ApplicationType::Alternance => {
                "alternance de 24 mois avec un rythme de 3 mois / 3 mois à partir de septembre 2026"
            }
            ApplicationType::Stage => "stage de 3 mois à partir de fin mai 2026",
        }
    }
}

impl std::fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationType {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alternance" => Ok(ApplicationType::Alternance),
            "stage" => Ok(ApplicationType::Stage),
            _ => Err("unknown application type"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            application_type: ApplicationType::Alternance,
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        let trimmed = self.output_dir.trim();
        self.output_dir = if trimmed.is_empty() {
            ".".to_string()
        } else {
            trimmed.to_string()
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Experience {
    /// End of the date range as displayed; a current position never shows its stored end date.
    pub fn end_label(&self) -> &str {
        if self.is_current {
            "Présent"
        } else {
            &self.end_date
        }
    }

    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

impl Education {
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Child list of a [`ProfileRecord`], used to address items by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Experience,
    Project,
    Education,
    Certification,
}

impl std::str::FromStr for ItemKind {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "experience" | "experiences" => Ok(ItemKind::Experience),
            "project" | "projects" => Ok(ItemKind::Project),
            "education" => Ok(ItemKind::Education),
            "certification" | "certifications" => Ok(ItemKind::Certification),
            _ => Err("unknown item kind"),
        }
    }
}

/// The master profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub bio: String,
    pub availability: String,
    pub skills: String,
    pub languages: String,
    pub interests: String,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub certifications: Vec<Certification>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
}

// Stored and imported documents sometimes carry a non-list `certifications`.
fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<Certification>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

impl ProfileRecord {
    /// Canonical skill labels: comma split, trimmed, empties dropped.
    pub fn skill_list(&self) -> Vec<String> {
        split_skills(&self.skills)
    }

    pub fn add_experience(&mut self, mut item: Experience) -> String {
        item.id = ensure_id(item.id);
        let id = item.id.clone();
        self.experiences.push(item);
        id
    }

    pub fn add_project(&mut self, mut item: Project) -> String {
        item.id = ensure_id(item.id);
        let id = item.id.clone();
        self.projects.push(item);
        id
    }

    pub fn add_education(&mut self, mut item: Education) -> String {
        item.id = ensure_id(item.id);
        let id = item.id.clone();
        self.education.push(item);
        id
    }

    pub fn add_certification(&mut self, mut item: Certification) -> String {
        item.id = ensure_id(item.id);
        let id = item.id.clone();
        self.certifications.push(item);
        id
    }

    /// Removes the child with `id` from the given list. Returns whether anything was removed.
    pub fn remove_item(&mut self, kind: ItemKind, id: &str) -> bool {
        fn remove<T>(list: &mut Vec<T>, id: &str, item_id: impl Fn(&T) -> &str) -> bool {
            let before = list.len();
            list.retain(|item| item_id(item) != id);
            list.len() != before
        }

        match kind {
            ItemKind::Experience => remove(&mut self.experiences, id, |e| e.id.as_str()),
            ItemKind::Project => remove(&mut self.projects, id, |p| p.id.as_str()),
            ItemKind::Education => remove(&mut self.education, id, |e| e.id.as_str()),
            ItemKind::Certification => remove(&mut self.certifications, id, |c| c.id.as_str()),
        }
    }
}

pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn ensure_id(id: String) -> String {
    if id.trim().is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        id
    }
}
