/// The fixed curriculum. Grade rows only ever reference these eight
/// subjects; the stored form is the accented display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Matematica,
    Portugues,
    Historia,
    Geografia,
    Ciencias,
    Ingles,
    Artes,
    EducacaoFisica,
}

/// Curriculum order. This is the column order of the pivot report and the
/// numbering offered by menu front-ends (1..=8).
pub const ALL: [Subject; 8] = [
    Subject::Matematica,
    Subject::Portugues,
    Subject::Historia,
    Subject::Geografia,
    Subject::Ciencias,
    Subject::Ingles,
    Subject::Artes,
    Subject::EducacaoFisica,
];

impl Subject {
    /// Display name, also the form stored in `notas.disciplina`.
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Matematica => "Matemática",
            Subject::Portugues => "Português",
            Subject::Historia => "História",
            Subject::Geografia => "Geografia",
            Subject::Ciencias => "Ciências",
            Subject::Ingles => "Inglês",
            Subject::Artes => "Artes",
            Subject::EducacaoFisica => "Educação Física",
        }
    }

    /// Accent-free key used for report columns.
    pub fn key(self) -> &'static str {
        match self {
            Subject::Matematica => "matematica",
            Subject::Portugues => "portugues",
            Subject::Historia => "historia",
            Subject::Geografia => "geografia",
            Subject::Ciencias => "ciencias",
            Subject::Ingles => "ingles",
            Subject::Artes => "artes",
            Subject::EducacaoFisica => "educacaoFisica",
        }
    }

    /// Position within the curriculum order.
    pub fn index(self) -> usize {
        ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Accepts the stored display name. Legacy stores only ever contain
    /// these exact strings, so no normalization is attempted.
    pub fn parse(name: &str) -> Option<Subject> {
        ALL.iter().copied().find(|s| s.as_str() == name)
    }

    /// Accepts the 1-based menu number front-ends present.
    pub fn from_number(n: i64) -> Option<Subject> {
        if (1..=ALL.len() as i64).contains(&n) {
            Some(ALL[(n - 1) as usize])
        } else {
            None
        }
    }
}
