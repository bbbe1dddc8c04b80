//! Test helpers and fixtures.

use jobpulse_core::{Certification, Education, Experience, ProfileRecord, Project};

pub fn sample_profile() -> ProfileRecord {
    let mut profile = ProfileRecord {
        full_name: "Zoé Martin".to_string(),
        email: "Zoe.Martin@Example.com".to_string(),
        phone: "0605961489".to_string(),
        location: "Lyon, France".to_string(),
        linkedin: "https://www.linkedin.com/in/zoe-martin".to_string(),
        github: "https://github.com/zoemartin/".to_string(),
        bio: "Étudiante en data science, à la recherche d'une alternance.".to_string(),
        availability: "Septembre 2026".to_string(),
        skills: "Python, SQL, Power BI, Pandas".to_string(),
        languages: "Français (natif), Anglais (C1)".to_string(),
        interests: "Escalade, photographie".to_string(),
        ..ProfileRecord::default()
    };
    profile.add_experience(Experience {
        company: "Acme Analytics".to_string(),
        role: "Data Analyst Stagiaire".to_string(),
        start_date: "2025-01".to_string(),
        end_date: "2025-06".to_string(),
        is_current: true,
        description: "Construction de tableaux de bord.\n- Automatisation des rapports hebdomadaires".to_string(),
        location: Some("Lyon".to_string()),
        ..Experience::default()
    });
    profile.add_education(Education {
        school: "Université Lyon 1".to_string(),
        degree: "Master Data Science".to_string(),
        start_date: "2024".to_string(),
        end_date: "2026".to_string(),
        ..Education::default()
    });
    profile.add_project(Project {
        name: "Prévision des ventes".to_string(),
        description: "Modèle de séries temporelles.".to_string(),
        technologies: "Python, Prophet".to_string(),
        ..Project::default()
    });
    profile.add_certification(Certification {
        name: "Google Data Analytics".to_string(),
        issuer: "Coursera".to_string(),
        date: "2024".to_string(),
        description: None,
        ..Certification::default()
    });
    profile
}

/// [`sample_profile`] with `count` experiences, enough to spill onto extra pages.
pub fn long_profile(count: usize) -> ProfileRecord {
    let mut profile = sample_profile();
    profile.experiences.clear();
    for index in 0..count {
        profile.add_experience(Experience {
            company: format!("Entreprise {index}"),
            role: format!("Poste {index}"),
            start_date: "2020".to_string(),
            end_date: "2021".to_string(),
            description: "Analyse des données clients et mise en place de pipelines de traitement.\n\
                          Présentation hebdomadaire des résultats aux équipes métier."
                .to_string(),
            ..Experience::default()
        });
    }
    profile
}

/// Generation response in the shape the service returns it.
pub fn sample_response() -> String {
    r#"```json
{
  "matchScore": 81,
  "missingSkills": ["python", "Docker"],
  "extractedJobTitle": "Data Analyst",
  "extractedCompany": "Banque Populaire",
  "optimizedProfile": {
    "fullName": "Zoé Martin",
    "email": "Zoe.Martin@Example.com",
    "phone": "0605961489",
    "location": "Lyon, France",
    "bio": "Candidate pour une ALTERNANCE DE 24 MOIS.",
    "skills": "Python, SQL, Python",
    "experiences": []
  },
  "coverLetter": "Objet : Candidature\nMadame, Monsieur,\n\nJe souhaite rejoindre vos équipes en SEPTEMBRE 2026.\n\nCordialement,\nZoé Martin",
  "analysis": "Profil solide."
}
```"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_unique_ids() {
        let profile = long_profile(5);
        let mut ids: Vec<_> = profile.experiences.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }
}
