//! Student profile data structures for score prediction.
//!
//! Each field is a closed set of categories fixed at model-training time.
//! The numeric/letter codes and the `FIELD_code` one-hot column names must
//! match the training data exactly; labels are only for display.

/// Age bracket (training field `TP_FAIXA_ETARIA`).
///
/// Codes are not contiguous: the training data kept brackets 1-8 plus the
/// grouped brackets 11 and 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Under17,
    Age17,
    Age18,
    Age19,
    Age20,
    Age21,
    Age22,
    Age23,
    Age26To30,
    Age31To35,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 10] = [
        AgeBracket::Under17,
        AgeBracket::Age17,
        AgeBracket::Age18,
        AgeBracket::Age19,
        AgeBracket::Age20,
        AgeBracket::Age21,
        AgeBracket::Age22,
        AgeBracket::Age23,
        AgeBracket::Age26To30,
        AgeBracket::Age31To35,
    ];

    /// Training-time category code.
    pub fn code(&self) -> u8 {
        match self {
            AgeBracket::Under17 => 1,
            AgeBracket::Age17 => 2,
            AgeBracket::Age18 => 3,
            AgeBracket::Age19 => 4,
            AgeBracket::Age20 => 5,
            AgeBracket::Age21 => 6,
            AgeBracket::Age22 => 7,
            AgeBracket::Age23 => 8,
            AgeBracket::Age26To30 => 11,
            AgeBracket::Age31To35 => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Under17 => "Menor de 17 anos",
            AgeBracket::Age17 => "17 anos",
            AgeBracket::Age18 => "18 anos",
            AgeBracket::Age19 => "19 anos",
            AgeBracket::Age20 => "20 anos",
            AgeBracket::Age21 => "21 anos",
            AgeBracket::Age22 => "22 anos",
            AgeBracket::Age23 => "23 anos",
            AgeBracket::Age26To30 => "26-30 anos",
            AgeBracket::Age31To35 => "31-35 anos",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.code() == code)
    }

    /// One-hot column name as produced at training time.
    pub fn column(&self) -> String {
        format!("TP_FAIXA_ETARIA_{}", self.code())
    }
}

/// School type (training field `TP_ESCOLA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolType {
    Private,
    Public,
}

impl SchoolType {
    pub const ALL: [SchoolType; 2] = [SchoolType::Private, SchoolType::Public];

    pub fn code(&self) -> u8 {
        match self {
            SchoolType::Private => 1,
            SchoolType::Public => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolType::Private => "Privada",
            SchoolType::Public => "Pública",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    pub fn column(&self) -> String {
        format!("TP_ESCOLA_{}", self.code())
    }
}

/// Self-declared race/color (training field `TP_COR_RACA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceCode {
    NotDeclared,
    Branca,
    Preta,
    Parda,
    Amarela,
    Indigena,
}

impl RaceCode {
    pub const ALL: [RaceCode; 6] = [
        RaceCode::NotDeclared,
        RaceCode::Branca,
        RaceCode::Preta,
        RaceCode::Parda,
        RaceCode::Amarela,
        RaceCode::Indigena,
    ];

    pub fn code(&self) -> u8 {
        match self {
            RaceCode::NotDeclared => 0,
            RaceCode::Branca => 1,
            RaceCode::Preta => 2,
            RaceCode::Parda => 3,
            RaceCode::Amarela => 4,
            RaceCode::Indigena => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RaceCode::NotDeclared => "Não declarado",
            RaceCode::Branca => "Branca",
            RaceCode::Preta => "Preta",
            RaceCode::Parda => "Parda",
            RaceCode::Amarela => "Amarela",
            RaceCode::Indigena => "Indígena",
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    pub fn column(&self) -> String {
        format!("TP_COR_RACA_{}", self.code())
    }
}

/// Exam state (training field `SG_UF_PROVA`). The model was trained on the
/// ten most represented states only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCode {
    Sp,
    Rj,
    Mg,
    Ba,
    Pr,
    Rs,
    Pe,
    Ce,
    Sc,
    Go,
}

impl StateCode {
    pub const ALL: [StateCode; 10] = [
        StateCode::Sp,
        StateCode::Rj,
        StateCode::Mg,
        StateCode::Ba,
        StateCode::Pr,
        StateCode::Rs,
        StateCode::Pe,
        StateCode::Ce,
        StateCode::Sc,
        StateCode::Go,
    ];

    /// Two-letter state code; also the training-time category identity.
    pub fn code(&self) -> &'static str {
        match self {
            StateCode::Sp => "SP",
            StateCode::Rj => "RJ",
            StateCode::Mg => "MG",
            StateCode::Ba => "BA",
            StateCode::Pr => "PR",
            StateCode::Rs => "RS",
            StateCode::Pe => "PE",
            StateCode::Ce => "CE",
            StateCode::Sc => "SC",
            StateCode::Go => "GO",
        }
    }

    pub fn label(&self) -> &'static str {
        self.code()
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    pub fn column(&self) -> String {
        format!("SG_UF_PROVA_{}", self.code())
    }
}

/// Family income bracket (training field `Q006`, questionnaire letters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeBracket {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    Q,
}

impl IncomeBracket {
    pub const ALL: [IncomeBracket; 9] = [
        IncomeBracket::A,
        IncomeBracket::B,
        IncomeBracket::C,
        IncomeBracket::D,
        IncomeBracket::E,
        IncomeBracket::F,
        IncomeBracket::G,
        IncomeBracket::H,
        IncomeBracket::Q,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            IncomeBracket::A => "A",
            IncomeBracket::B => "B",
            IncomeBracket::C => "C",
            IncomeBracket::D => "D",
            IncomeBracket::E => "E",
            IncomeBracket::F => "F",
            IncomeBracket::G => "G",
            IncomeBracket::H => "H",
            IncomeBracket::Q => "Q",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IncomeBracket::A => "Nenhuma renda",
            IncomeBracket::B => "Até R$ 1.320",
            IncomeBracket::C => "R$ 1.320 - R$ 1.980",
            IncomeBracket::D => "R$ 1.980 - R$ 2.640",
            IncomeBracket::E => "R$ 2.640 - R$ 3.300",
            IncomeBracket::F => "R$ 3.300 - R$ 3.960",
            IncomeBracket::G => "R$ 3.960 - R$ 5.280",
            IncomeBracket::H => "R$ 5.280 - R$ 6.600",
            IncomeBracket::Q => "Acima de R$ 26.400",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|i| i.code() == code)
    }

    pub fn column(&self) -> String {
        format!("Q006_{}", self.code())
    }
}

/// A student's demographic profile. All fields required; immutable once
/// submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub age: AgeBracket,
    pub school: SchoolType,
    pub race: RaceCode,
    pub state: StateCode,
    pub income: IncomeBracket,
}

impl Profile {
    /// The one-hot columns this profile activates, one per field.
    pub fn active_columns(&self) -> [String; 5] {
        [
            self.age.column(),
            self.school.column(),
            self.race.column(),
            self.state.column(),
            self.income.column(),
        ]
    }
}

impl Default for Profile {
    /// Matches the form's initial selection: an 18-year-old public-school
    /// student, parda, from SP, income bracket C.
    fn default() -> Self {
        Self {
            age: AgeBracket::Age18,
            school: SchoolType::Public,
            race: RaceCode::Parda,
            state: StateCode::Sp,
            income: IncomeBracket::C,
        }
    }
}
