//! Professions an educator can list on their profile.

/// A regulated or recognised profession, identified by a stable code.
pub struct Profession {
    pub code: &'static str,
    /// Short label shown in search results
    pub label: &'static str,
    /// Longer description printed on invoices
    pub description: &'static str,
}

pub const PROFESSIONS: &[Profession] = &[
    Profession {
        code: "educateur_specialise",
        label: "Educateur specialise",
        description: "Accompagnement educatif specialise (DEES)",
    },
    Profession {
        code: "moniteur_educateur",
        label: "Moniteur educateur",
        description: "Accompagnement educatif au quotidien (DEME)",
    },
    Profession {
        code: "accompagnant_educatif_social",
        label: "Accompagnant educatif et social",
        description: "Aide a la vie quotidienne et a l'inclusion (DEAES)",
    },
    Profession {
        code: "psychomotricien",
        label: "Psychomotricien",
        description: "Seance de psychomotricite",
    },
    Profession {
        code: "orthophoniste",
        label: "Orthophoniste",
        description: "Seance d'orthophonie",
    },
    Profession {
        code: "ergotherapeute",
        label: "Ergotherapeute",
        description: "Seance d'ergotherapie",
    },
    Profession {
        code: "psychologue",
        label: "Psychologue",
        description: "Consultation psychologique",
    },
    Profession {
        code: "neuropsychologue",
        label: "Neuropsychologue",
        description: "Bilan ou suivi neuropsychologique",
    },
    Profession {
        code: "analyste_comportement",
        label: "Analyste du comportement",
        description: "Intervention comportementale (ABA)",
    },
];

pub fn find_profession(code: &str) -> Option<&'static Profession> {
    PROFESSIONS.iter().find(|profession| profession.code == code)
}

/// Label for `code`, falling back to the code itself for professions no longer listed.
pub fn profession_label(code: &str) -> String {
    find_profession(code)
        .map(|profession| profession.label.to_string())
        .unwrap_or_else(|| code.to_string())
}
