use core::fmt;
use std::path::{Path, PathBuf};

use custodia_domain::{AcquiredFile, CustodianRecord, OwnerRecord};
use custodia_layout::{
    styles, write_pdf, CrestImage, LabeledLine, LayoutBlock, LayoutEngine, PageGeometry,
    PagedDocument, PdfError, CM,
};

use crate::jurisdiction::header_for;
use crate::stamp::RunStamp;

const TITLE_LINE_1: &str = "CERTIDÃO DE AQUISIÇÃO";
const TITLE_LINE_2: &str = "DE EVIDÊNCIA DIGITAL";

const TECHNICAL_NOTE_TITLE: &str = "Nota Técnica de Extração:";
const TECHNICAL_NOTE: &str = "A extração de hash SHA-256 é utilizada para garantir a \
integridade de arquivos digitais. O software lê cada arquivo em blocos binários e gera um \
resumo criptográfico que funciona como uma 'impressão digital' do conteúdo, permitindo \
verificar posteriormente que a evidência não foi alterada.";

/// Everything the composer needs for one certificate.
#[derive(Debug, Clone, Copy)]
pub struct CertificateInput<'a> {
    pub custodian: &'a CustodianRecord,
    pub owner: &'a OwnerRecord,
    pub files: &'a [AcquiredFile],
    pub stamp: &'a RunStamp,
}

#[derive(Debug)]
pub enum ComposeError {
    Pdf(PdfError),
    Io(std::io::Error),
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf(e) => write!(f, "certificate rendering failed: {e}"),
            Self::Io(e) => write!(f, "could not write minute of filing: {e}"),
        }
    }
}

impl std::error::Error for ComposeError {}

/// Paths of the two artifacts one run emits into `Certificates/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateArtifacts {
    pub certificate: PathBuf,
    pub minute: PathBuf,
}

/// Builds the certificate's block sequence in its fixed order: crest,
/// jurisdiction header, title, declaration, custodian/owner columns, one
/// block per file, technical note, signature.
pub fn compose_blocks(input: &CertificateInput<'_>, with_crest: bool) -> Vec<LayoutBlock> {
    let custodian = input.custodian;
    let header = header_for(custodian.region);
    let signer = format!("{} {}", custodian.rank.as_str(), custodian.name);

    let mut blocks = Vec::new();

    if with_crest {
        blocks.push(LayoutBlock::Crest);
    }

    for line in [header.state, header.secretariat, header.force] {
        blocks.push(LayoutBlock::Centered {
            text: line.to_string(),
            style: styles::HEADER,
        });
        blocks.push(LayoutBlock::Gap { height: 0.3 * CM });
    }
    blocks.push(LayoutBlock::Gap { height: 0.7 * CM });

    for line in [TITLE_LINE_1, TITLE_LINE_2] {
        blocks.push(LayoutBlock::Centered {
            text: line.to_string(),
            style: styles::TITLE,
        });
        blocks.push(LayoutBlock::Gap { height: 0.3 * CM });
    }
    blocks.push(LayoutBlock::Gap { height: 0.7 * CM });

    blocks.push(LayoutBlock::Paragraph {
        text: declaration_text(custodian, input.stamp),
        style: styles::DECLARATION,
    });
    blocks.push(LayoutBlock::Rule { dashed: false });

    blocks.push(LayoutBlock::TwoColumn {
        left_title: "Apreensor:".to_string(),
        right_title: "Proprietário das Evidências:".to_string(),
        left: custodian_lines(custodian, input.stamp),
        right: owner_lines(input.owner),
        title_style: styles::SECTION_TITLE,
        body_style: styles::INFO,
    });
    blocks.push(LayoutBlock::Rule { dashed: false });

    for file in input.files {
        blocks.push(LayoutBlock::Labeled {
            lines: file_lines(file),
            style: styles::FILE_INFO,
        });
        blocks.push(LayoutBlock::Rule { dashed: true });
    }

    blocks.push(LayoutBlock::Rule { dashed: false });
    blocks.push(LayoutBlock::Labeled {
        lines: vec![
            LabeledLine::new(TECHNICAL_NOTE_TITLE, ""),
            LabeledLine::new("", TECHNICAL_NOTE),
        ],
        style: styles::FILE_INFO,
    });
    blocks.push(LayoutBlock::Rule { dashed: false });

    blocks.push(LayoutBlock::Gap { height: 2.5 * CM });
    blocks.push(LayoutBlock::Signature {
        name: signer,
        style: styles::SIGNATURE,
    });

    blocks
}

/// Lays the certificate out on A4 pages. Deterministic for a fixed input
/// and stamp.
pub fn render(input: &CertificateInput<'_>, with_crest: bool) -> PagedDocument {
    let mut engine = LayoutEngine::new(PageGeometry::a4(), footer_stamp(input.stamp));
    let blocks = compose_blocks(input, with_crest);
    engine.place_all(&blocks);
    engine.finish()
}

/// Emits both artifacts into the given `Certificates/` folder, named with
/// the run stamp.
pub fn write_artifacts(
    input: &CertificateInput<'_>,
    crest: Option<&CrestImage>,
    certificates_dir: &Path,
) -> Result<CertificateArtifacts, ComposeError> {
    let document = render(input, crest.is_some());

    let certificate =
        certificates_dir.join(format!("Certidao_{}.pdf", input.stamp.file_suffix()));
    write_pdf(&document, &PageGeometry::a4(), crest, &certificate)
        .map_err(ComposeError::Pdf)?;

    let minute = certificates_dir.join(format!(
        "Minuta_de_Juntada_{}.txt",
        input.stamp.file_suffix()
    ));
    crate::minute::write_minute(&minute, input.files, input.stamp).map_err(ComposeError::Io)?;

    Ok(CertificateArtifacts {
        certificate,
        minute,
    })
}

pub fn footer_stamp(stamp: &RunStamp) -> String {
    format!(
        "Gerado por Custodia - Aquisição em {}",
        stamp.display_short()
    )
}

fn declaration_text(custodian: &CustodianRecord, stamp: &RunStamp) -> String {
    format!(
        "Certifico a aquisição da evidência digital abaixo relacionada em {}, por {} {}, em \
         conformidade com os Artigos 158-A a 158-D do CPP e Norma ABNT NBR ISO/IEC 27037:2013. \
         O arquivo foi copiado para dispositivo seguro, com hash SHA-256 para integridade. Esta \
         aquisição observa os princípios da cadeia de custódia, conforme a legislação vigente, \
         para preservar a autenticidade e integridade da prova digital.",
        stamp.display_short(),
        custodian.rank.as_str(),
        custodian.name,
    )
}

fn custodian_lines(custodian: &CustodianRecord, stamp: &RunStamp) -> Vec<LabeledLine> {
    vec![
        LabeledLine::new(
            "Nome:",
            format!("{} {}", custodian.rank.as_str(), custodian.name),
        ),
        LabeledLine::new("CPF:", custodian.id.clone()),
        LabeledLine::new("Função:", custodian.function.as_str()),
        LabeledLine::new("Orgão:", custodian.authority.clone()),
        LabeledLine::new("Portaria:", custodian.order_number.clone()),
        LabeledLine::new("Data e hora:", stamp.display_full()),
    ]
}

fn owner_lines(owner: &OwnerRecord) -> Vec<LabeledLine> {
    vec![
        LabeledLine::new("Nome:", owner.name.clone()),
        LabeledLine::new("Tipo:", owner.identifier.kind().as_str()),
        LabeledLine::new("CPF/CNPJ:", owner.identifier.display_value()),
    ]
}

fn file_lines(file: &AcquiredFile) -> Vec<LabeledLine> {
    vec![
        LabeledLine::new("Nome:", file.file_name()),
        LabeledLine::new("Tamanho:", format!("{:.2} KB", file.size_kib())),
        LabeledLine::new("Hash SHA-256:", file.digest.to_hex()),
    ]
}
