//! The prewritten letter catalog.
//!
//! Letter copy is authored, not generated: each body argues one angle
//! (economics, criminal justice, medicine, personal freedom) and carries
//! the two placeholder tokens substituted at send time.

use std::fmt;
use std::str::FromStr;

/// The four letter topics a constituent can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Economic,
    Criminal,
    Medical,
    Freedom,
}

/// Error returned when a string names no known topic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown letter topic {raw:?} (expected economic, criminal, medical or freedom)")]
pub struct TopicError {
    raw: String,
}

impl Topic {
    pub const ALL: [Self; 4] = [Self::Economic, Self::Criminal, Self::Medical, Self::Freedom];

    /// Stable key used in URLs and on the wire.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Economic => "economic",
            Self::Criminal => "criminal",
            Self::Medical => "medical",
            Self::Freedom => "freedom",
        }
    }

    /// The letter written for this topic.
    #[must_use]
    pub fn letter(self) -> &'static Letter {
        match self {
            Self::Economic => &ECONOMIC,
            Self::Criminal => &CRIMINAL,
            Self::Medical => &MEDICAL,
            Self::Freedom => &FREEDOM,
        }
    }
}

impl FromStr for Topic {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|topic| topic.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TopicError {
                raw: trimmed.to_string(),
            })
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl serde::Serialize for Topic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> serde::Deserialize<'de> for Topic {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One prewritten advocacy letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub topic: Topic,
    pub title: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

impl Letter {
    /// All four letters in presentation order.
    #[must_use]
    pub fn all() -> impl Iterator<Item = &'static Self> {
        Topic::ALL.into_iter().map(Topic::letter)
    }
}

const ECONOMIC: Letter = Letter {
    topic: Topic::Economic,
    title: "Economic Benefits Focus",
    subject: "Support Cannabis Legalization for Wisconsin's Economic Growth and Business Protection",
    body: r"Dear [Representative/Senator Name],

As your constituent and someone who supports Wisconsin's growing hemp and cannabis industry, I am writing to urge your support for comprehensive cannabis legalization. This policy change would provide transformative economic advantages while protecting responsible Wisconsin businesses from harmful restrictive legislation.

Wisconsin is losing significant economic opportunities to neighboring states while our own hemp businesses face legislative threats. Consider these compelling economic impacts:

**Tax Revenue & Business Protection:**
• Wisconsin could generate $165.8 million annually in tax revenue from cannabis legalization (Legislative Fiscal Bureau, 2019)
• Illinois collected $445.3 million in cannabis tax revenue in 2022 alone (Illinois Department of Revenue, 2023)

**Lost Revenue to Neighboring States:**
• An estimated $435 million in cannabis sales from Wisconsin residents goes to Illinois dispensaries annually (Chicago Sun-Times analysis, 2023)
• The legal cannabis industry supports 428,059 full-time jobs nationally with wages 11% higher than the national median (Whitney Economics, 2023)

Wisconsin cannot afford to continue losing tax revenue and jobs to neighboring states while our own businesses operate under constant threat. Please support cannabis legalization to protect Wisconsin businesses and capture this economic opportunity.

Sincerely,
[Full Name]",
};

const CRIMINAL: Letter = Letter {
    topic: Topic::Criminal,
    title: "Criminal Justice Reform Focus",
    subject: "Support Cannabis Legalization as Essential Criminal Justice Reform",
    body: r"Dear [Representative/Senator Name],

I am writing as your constituent to urge your support for cannabis legalization in Wisconsin as a critical criminal justice reform measure. Current enforcement disproportionately impacts communities while responsible hemp businesses operate under constant legal uncertainty.

**Enforcement Costs & Racial Disparities:**
• Wisconsin made 15,217 cannabis arrests in 2021, costing taxpayers approximately $53 million annually (FBI Crime Data Explorer, 2022)
• Black Wisconsinites are 4.3 times more likely to be arrested for cannabis than white residents, despite similar usage rates (ACLU Analysis, 2020)
• Cannabis arrests account for 42% of all drug arrests in Wisconsin

**Law Enforcement and Crime:**
• 67% of police officers believe cannabis laws should be relaxed (Pew Research Center, 2022)
• States with legalization saw violent crime clearance rates increase by 7% as resources were redirected (Police Executive Research Forum, 2023)

Wisconsin's hemp industry demonstrates that responsible cannabis commerce can exist. I urge you to support cannabis legalization as common-sense criminal justice reform that will reduce enforcement costs, eliminate disparities, and provide legal clarity for responsible businesses.

Sincerely,
[Full Name]",
};

const MEDICAL: Letter = Letter {
    topic: Topic::Medical,
    title: "Medical Benefits Focus",
    subject: "Support Medical Cannabis Access for Wisconsin Patients",
    body: r"Dear [Representative/Senator Name],

As your constituent, I am writing to request your support for cannabis legalization in Wisconsin to ensure medical access for patients who desperately need this proven treatment option. Wisconsin businesses are already providing hemp-based wellness products, demonstrating the demand for cannabis medicine.

**Clinical Evidence & Patient Need:**
• The National Academy of Sciences found conclusive evidence that cannabis effectively treats chronic pain, affecting 50 million Americans (National Academies, 2017)
• Cannabis reduces opioid use by 64% on average in chronic pain patients (JAMA Internal Medicine, 2022)

**Wisconsin Business Infrastructure:**
• Companies like Kind Oasis already manufacture and retail lab-tested hemp-derived products for wellness use
• 68% of Wisconsin physicians support medical cannabis access (Wisconsin Medical Society Survey, 2022)
• Wisconsin veterans make up 23% of out-of-state medical cannabis patients in Illinois

Wisconsin's hemp industry proves that safe, regulated cannabis products can serve medical needs while supporting local economies. I urge you to support comprehensive cannabis legalization that ensures safe, regulated medical access through Wisconsin businesses.

Sincerely,
[Full Name]",
};

const FREEDOM: Letter = Letter {
    topic: Topic::Freedom,
    title: "Personal Freedom and Public Safety Focus",
    subject: "Support Cannabis Legalization to Enhance Freedom and Protect Responsible Businesses",
    body: r"Dear [Representative/Senator Name],

I am writing as your constituent to urge your support for cannabis legalization in Wisconsin based on principles of personal freedom, public safety, and protection of responsible businesses from special interest legislation.

**Public Safety Through Regulation:**
• Teen cannabis use decreased 9% in states with legalization (JAMA Pediatrics, 2023)
• Regulated cannabis has 70% fewer contaminants than illegal market products (Journal of Cannabis Research, 2023)
• 91% of Americans support legal cannabis access in some form (Gallup Poll, 2023)

**Economic Freedom & Special Interest Opposition:**
• Wisconsin hemp businesses like Kind Oasis and BATCH face closure from Tavern League's harmful restrictions
• The illegal market generates $1.2 billion annually in Wisconsin with zero tax revenue or safety oversight (Wisconsin Policy Research Institute, 2023)
• Legalization would save Wisconsin $100+ million annually in enforcement costs (Wisconsin Taxpayers Alliance, 2023)

Wisconsin's hemp businesses prove that responsible cannabis commerce creates jobs, ensures product safety, and serves community needs. Don't let special interests destroy these Wisconsin businesses through restrictive legislation.

I urge you to support cannabis legalization that protects responsible businesses, enhances public safety through regulation, and upholds personal freedom.

Sincerely,
[Full Name]",
};
