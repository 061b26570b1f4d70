use serde::{Deserialize, Serialize};

/// How a collection was paid. The serialized labels match the fixed list
/// the entry form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionMethod {
    #[serde(rename = "Nakit")]
    Nakit,
    #[serde(rename = "Kredi Kartı")]
    KrediKarti,
    #[serde(rename = "Banka Havalesi")]
    BankaHavalesi,
    #[serde(rename = "Çek")]
    Cek,
    #[serde(rename = "Senet")]
    Senet,
}

impl std::fmt::Display for CollectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionMethod::Nakit => write!(f, "Nakit"),
            CollectionMethod::KrediKarti => write!(f, "Kredi Kartı"),
            CollectionMethod::BankaHavalesi => write!(f, "Banka Havalesi"),
            CollectionMethod::Cek => write!(f, "Çek"),
            CollectionMethod::Senet => write!(f, "Senet"),
        }
    }
}

impl std::str::FromStr for CollectionMethod {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Nakit" => Ok(CollectionMethod::Nakit),
            "Kredi Kartı" | "Kredi Karti" => Ok(CollectionMethod::KrediKarti),
            "Banka Havalesi" => Ok(CollectionMethod::BankaHavalesi),
            "Çek" | "Cek" => Ok(CollectionMethod::Cek),
            "Senet" => Ok(CollectionMethod::Senet),
            other => Err(format!("Unknown collection method: '{other}'")),
        }
    }
}
