use std::path::PathBuf;

use serde::Deserialize;

use crate::digest::Digest32;

/// Military-police rank of the acquiring custodian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Rank {
    #[serde(rename = "Cel PM")]
    Colonel,
    #[serde(rename = "TCel PM")]
    LieutenantColonel,
    #[serde(rename = "Major PM")]
    Major,
    #[serde(rename = "Cap PM")]
    Captain,
    #[serde(rename = "1ºTen PM")]
    FirstLieutenant,
    #[serde(rename = "2ºTen PM")]
    SecondLieutenant,
    #[serde(rename = "SubTen PM")]
    SubLieutenant,
    #[serde(rename = "1ºSgt PM")]
    FirstSergeant,
    #[serde(rename = "2ºSgt PM")]
    SecondSergeant,
    #[serde(rename = "3ºSgt PM")]
    ThirdSergeant,
    #[serde(rename = "Cabo")]
    Corporal,
    #[serde(rename = "Sd PM")]
    Soldier,
}

impl Rank {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Colonel => "Cel PM",
            Self::LieutenantColonel => "TCel PM",
            Self::Major => "Major PM",
            Self::Captain => "Cap PM",
            Self::FirstLieutenant => "1ºTen PM",
            Self::SecondLieutenant => "2ºTen PM",
            Self::SubLieutenant => "SubTen PM",
            Self::FirstSergeant => "1ºSgt PM",
            Self::SecondSergeant => "2ºSgt PM",
            Self::ThirdSergeant => "3ºSgt PM",
            Self::Corporal => "Cabo",
            Self::Soldier => "Sd PM",
        }
    }
}

/// Judiciary-police duty performed by the custodian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DutyFunction {
    #[serde(rename = "Autoridade de PJM")]
    JudiciaryAuthority,
    #[serde(rename = "Autoridade Delegada de PJM")]
    DelegatedAuthority,
    #[serde(rename = "Escrivão PJM")]
    Clerk,
}

impl DutyFunction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JudiciaryAuthority => "Autoridade de PJM",
            Self::DelegatedAuthority => "Autoridade Delegada de PJM",
            Self::Clerk => "Escrivão PJM",
        }
    }
}

/// Federation unit the acquisition is performed under. Drives the
/// three-line certificate header. Records that omit the region fall back
/// to Rio Grande do Sul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Region {
    #[serde(rename = "Acre")]
    Acre,
    #[serde(rename = "Amapá")]
    Amapa,
    #[serde(rename = "Amazonas")]
    Amazonas,
    #[serde(rename = "Pará")]
    Para,
    #[serde(rename = "Rondônia")]
    Rondonia,
    #[serde(rename = "Roraima")]
    Roraima,
    #[serde(rename = "Tocantins")]
    Tocantins,
    #[serde(rename = "Alagoas")]
    Alagoas,
    #[serde(rename = "Bahia")]
    Bahia,
    #[serde(rename = "Ceará")]
    Ceara,
    #[serde(rename = "Maranhão")]
    Maranhao,
    #[serde(rename = "Paraíba")]
    Paraiba,
    #[serde(rename = "Pernambuco")]
    Pernambuco,
    #[serde(rename = "Piauí")]
    Piaui,
    #[serde(rename = "Rio Grande do Norte")]
    RioGrandeDoNorte,
    #[serde(rename = "Sergipe")]
    Sergipe,
    #[serde(rename = "Goiás")]
    Goias,
    #[serde(rename = "Mato Grosso")]
    MatoGrosso,
    #[serde(rename = "Mato Grosso do Sul")]
    MatoGrossoDoSul,
    #[serde(rename = "Distrito Federal")]
    DistritoFederal,
    #[serde(rename = "Espírito Santo")]
    EspiritoSanto,
    #[serde(rename = "Minas Gerais")]
    MinasGerais,
    #[serde(rename = "Rio de Janeiro")]
    RioDeJaneiro,
    #[serde(rename = "São Paulo")]
    SaoPaulo,
    #[serde(rename = "Paraná")]
    Parana,
    #[serde(rename = "Santa Catarina")]
    SantaCatarina,
    #[default]
    #[serde(rename = "Rio Grande do Sul")]
    RioGrandeDoSul,
}

impl Region {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acre => "Acre",
            Self::Amapa => "Amapá",
            Self::Amazonas => "Amazonas",
            Self::Para => "Pará",
            Self::Rondonia => "Rondônia",
            Self::Roraima => "Roraima",
            Self::Tocantins => "Tocantins",
            Self::Alagoas => "Alagoas",
            Self::Bahia => "Bahia",
            Self::Ceara => "Ceará",
            Self::Maranhao => "Maranhão",
            Self::Paraiba => "Paraíba",
            Self::Pernambuco => "Pernambuco",
            Self::Piaui => "Piauí",
            Self::RioGrandeDoNorte => "Rio Grande do Norte",
            Self::Sergipe => "Sergipe",
            Self::Goias => "Goiás",
            Self::MatoGrosso => "Mato Grosso",
            Self::MatoGrossoDoSul => "Mato Grosso do Sul",
            Self::DistritoFederal => "Distrito Federal",
            Self::EspiritoSanto => "Espírito Santo",
            Self::MinasGerais => "Minas Gerais",
            Self::RioDeJaneiro => "Rio de Janeiro",
            Self::SaoPaulo => "São Paulo",
            Self::Parana => "Paraná",
            Self::SantaCatarina => "Santa Catarina",
            Self::RioGrandeDoSul => "Rio Grande do Sul",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OwnerKind {
    #[serde(rename = "Pessoa Física")]
    Individual,
    #[serde(rename = "Pessoa Jurídica")]
    Organization,
    #[serde(rename = "Indeterminado")]
    Unknown,
}

impl OwnerKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "Pessoa Física",
            Self::Organization => "Pessoa Jurídica",
            Self::Unknown => "Indeterminado",
        }
    }
}

/// The owner identifier expected for a given owner kind. The variant is a
/// pure function of the declared kind; a missing value for a known kind is
/// rendered as "Indeterminado" and skips check-digit validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerIdentifier {
    Individual { id: Option<String> },
    Organization { id: Option<String> },
    Unknown,
}

impl OwnerIdentifier {
    pub const fn kind(&self) -> OwnerKind {
        match self {
            Self::Individual { .. } => OwnerKind::Individual,
            Self::Organization { .. } => OwnerKind::Organization,
            Self::Unknown => OwnerKind::Unknown,
        }
    }

    pub fn display_value(&self) -> &str {
        match self {
            Self::Individual { id: Some(id) } | Self::Organization { id: Some(id) } => id,
            _ => "Indeterminado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOwnerRecord")]
pub struct OwnerRecord {
    pub name: String,
    pub identifier: OwnerIdentifier,
}

#[derive(Deserialize)]
struct RawOwnerRecord {
    name: String,
    kind: OwnerKind,
    #[serde(default)]
    id: Option<String>,
}

impl From<RawOwnerRecord> for OwnerRecord {
    fn from(raw: RawOwnerRecord) -> Self {
        let id = raw.id.filter(|v| !v.trim().is_empty());
        let identifier = match raw.kind {
            OwnerKind::Individual => OwnerIdentifier::Individual { id },
            OwnerKind::Organization => OwnerIdentifier::Organization { id },
            OwnerKind::Unknown => OwnerIdentifier::Unknown,
        };
        Self {
            name: raw.name,
            identifier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustodianRecord {
    pub name: String,
    pub rank: Rank,
    pub id: String,
    pub function: DutyFunction,
    pub authority: String,
    pub order_number: String,
    #[serde(default)]
    pub region: Region,
}

/// The complete input supplied by the presentation layer for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    pub custodian: CustodianRecord,
    pub owner: OwnerRecord,
    pub files: Vec<PathBuf>,
}

/// One file that survived copy and hash. The digest never changes once
/// the record exists; a failed copy or hash aborts the run instead of
/// producing a partial record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredFile {
    pub source: PathBuf,
    pub copied: PathBuf,
    pub size_bytes: u64,
    pub digest: Digest32,
}

impl AcquiredFile {
    pub fn file_name(&self) -> String {
        self.copied
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn size_kib(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_record_parses_display_strings() {
        let raw = r#"{
            "custodian": {
                "name": "Robson Laurindo",
                "rank": "Cap PM",
                "id": "529.982.247-25",
                "function": "Escrivão PJM",
                "authority": "2º BPM",
                "order_number": "15/2024",
                "region": "Rio Grande do Sul"
            },
            "owner": {
                "name": "Acme Ltda",
                "kind": "Pessoa Jurídica",
                "id": "11.222.333/0001-81"
            },
            "files": ["/tmp/a.bin", "/tmp/b.bin"]
        }"#;

        let record: InputRecord = serde_json::from_str(raw).expect("parse record");
        assert_eq!(record.custodian.rank, Rank::Captain);
        assert_eq!(record.custodian.region, Region::RioGrandeDoSul);
        assert_eq!(record.custodian.function, DutyFunction::Clerk);
        assert_eq!(
            record.owner.identifier,
            OwnerIdentifier::Organization {
                id: Some("11.222.333/0001-81".to_string())
            }
        );
        assert_eq!(record.files.len(), 2);
    }

    #[test]
    fn owner_without_id_keeps_kind_and_renders_indeterminate() {
        let raw = r#"{"name": "Fulano", "kind": "Pessoa Física"}"#;
        let owner: OwnerRecord = serde_json::from_str(raw).expect("parse owner");
        assert_eq!(owner.identifier, OwnerIdentifier::Individual { id: None });
        assert_eq!(owner.identifier.display_value(), "Indeterminado");
    }

    #[test]
    fn owner_blank_id_is_treated_as_absent() {
        let raw = r#"{"name": "Fulano", "kind": "Pessoa Jurídica", "id": "  "}"#;
        let owner: OwnerRecord = serde_json::from_str(raw).expect("parse owner");
        assert_eq!(owner.identifier, OwnerIdentifier::Organization { id: None });
    }

    #[test]
    fn unknown_owner_ignores_identifier() {
        let raw = r#"{"name": "", "kind": "Indeterminado", "id": "52998224725"}"#;
        let owner: OwnerRecord = serde_json::from_str(raw).expect("parse owner");
        assert_eq!(owner.identifier, OwnerIdentifier::Unknown);
        assert_eq!(owner.identifier.kind(), OwnerKind::Unknown);
    }

    #[test]
    fn omitted_region_falls_back_to_rio_grande_do_sul() {
        let raw = r#"{
            "name": "Fulano",
            "rank": "Sd PM",
            "id": "52998224725",
            "function": "Autoridade de PJM",
            "authority": "1º BPM",
            "order_number": "9"
        }"#;
        let custodian: CustodianRecord = serde_json::from_str(raw).expect("parse custodian");
        assert_eq!(custodian.region, Region::RioGrandeDoSul);
    }

    #[test]
    fn unknown_rank_is_rejected() {
        let raw = r#""General PM""#;
        assert!(serde_json::from_str::<Rank>(raw).is_err());
    }
}
