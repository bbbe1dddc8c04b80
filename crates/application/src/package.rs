//! Parsing and merging of the generation service's response.

use std::sync::LazyLock;

use jobpulse_core::ProfileRecord;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::GenerationError;

/// Most skills the CV grid shows.
pub const MAX_SKILLS: usize = 12;

// Fields that are always restored from the stored profile.
const PROTECTED_FIELDS: [&str; 6] = [
    "experiences",
    "education",
    "projects",
    "certifications",
    "languages",
    "interests",
];

static CONTRACT_PHRASES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        "alternance de 24 mois",
        "rythme de 3 mois / 3 mois",
        "stage de 3 mois",
        "fin mai 2026",
        "septembre 2026",
    ]
    .into_iter()
    .map(|phrase| {
        let pattern = format!("(?i){}", regex::escape(phrase));
        (Regex::new(&pattern).expect("contract phrase regex"), phrase)
    })
    .collect()
});

/// Tailored profile, cover letter and scoring returned for one job offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPackage {
    pub match_score: u8,
    pub missing_skills: Vec<String>,
    pub extracted_job_title: String,
    pub extracted_company: String,
    pub optimized_profile: ProfileRecord,
    pub cover_letter: String,
    pub analysis: String,
}

/// Parses a raw response. Code fences around the JSON are ignored.
///
/// `optimizedProfile.skills` may be a comma-joined string or a list of labels.
pub fn parse_package(raw: &str) -> Result<ApplicationPackage, GenerationError> {
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let value: Value = serde_json::from_str(&text)?;
    let Value::Object(mut root) = value else {
        return Err(GenerationError::NotAnObject);
    };

    let Some(Value::Object(mut profile)) = root.remove("optimizedProfile") else {
        return Err(GenerationError::MissingProfile);
    };
    for field in PROTECTED_FIELDS {
        profile.remove(field);
    }
    // A null field takes the profile default.
    profile.retain(|_, value| !value.is_null());
    let skills = profile.remove("skills").map(skill_labels).unwrap_or_default();
    let mut optimized_profile: ProfileRecord =
        serde_json::from_value(Value::Object(profile)).map_err(GenerationError::InvalidProfile)?;
    optimized_profile.skills = skills.join(", ");

    Ok(ApplicationPackage {
        match_score: match_score(root.get("matchScore")),
        missing_skills: root
            .get("missingSkills")
            .map(string_list)
            .unwrap_or_default(),
        extracted_job_title: string_field(&root, "extractedJobTitle"),
        extracted_company: string_field(&root, "extractedCompany"),
        optimized_profile,
        cover_letter: string_field(&root, "coverLetter"),
        analysis: string_field(&root, "analysis"),
    })
}

/// Restores the stored profile's protected fields onto `package` and settles the skill list.
pub fn merge_package(original: &ProfileRecord, mut package: ApplicationPackage) -> ApplicationPackage {
    let profile = &mut package.optimized_profile;
    profile.experiences = original.experiences.clone();
    profile.education = original.education.clone();
    profile.projects = original.projects.clone();
    profile.certifications = original.certifications.clone();
    profile.languages = original.languages.clone();
    profile.interests = original.interests.clone();

    profile.bio = normalize_contract_text(&profile.bio);
    package.cover_letter = normalize_contract_text(&package.cover_letter);

    let skills = package.optimized_profile.skill_list();
    package.optimized_profile.skills = merge_skills(&skills, &package.missing_skills);
    package
}

/// Puts every missing skill in front of `skills` unless already present,
/// ignoring case, and keeps the first [`MAX_SKILLS`] labels.
pub fn merge_skills(skills: &[String], missing: &[String]) -> String {
    let mut merged: Vec<String> = Vec::with_capacity(skills.len() + missing.len());
    for skill in skills {
        push_unique(&mut merged, skill, false);
    }
    for skill in missing {
        push_unique(&mut merged, skill, true);
    }
    merged.truncate(MAX_SKILLS);
    merged.join(", ")
}

fn push_unique(skills: &mut Vec<String>, skill: &str, front: bool) {
    let skill = skill.trim();
    if skill.is_empty() || skills.iter().any(|s| s.to_lowercase() == skill.to_lowercase()) {
        return;
    }
    if front {
        skills.insert(0, skill.to_string());
    } else {
        skills.push(skill.to_string());
    }
}

/// Lower-cases the contract wording wherever it appears, whatever its case.
pub fn normalize_contract_text(text: &str) -> String {
    CONTRACT_PHRASES
        .iter()
        .fold(text.to_string(), |acc, (pattern, phrase)| {
            pattern.replace_all(&acc, *phrase).into_owned()
        })
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn skill_labels(value: Value) -> Vec<String> {
    match value {
        Value::String(joined) => jobpulse_core::split_skills(&joined),
        other => string_list(&other),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn string_field(root: &Map<String, Value>, key: &str) -> String {
    root.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn match_score(value: Option<&Value>) -> u8 {
    value
        .and_then(Value::as_f64)
        .map(|score| score.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}
