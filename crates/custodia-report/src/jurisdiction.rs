use custodia_domain::Region;

/// The three-line certificate header for one federation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JurisdictionHeader {
    pub state: &'static str,
    pub secretariat: &'static str,
    pub force: &'static str,
}

const fn header(
    state: &'static str,
    secretariat: &'static str,
    force: &'static str,
) -> JurisdictionHeader {
    JurisdictionHeader {
        state,
        secretariat,
        force,
    }
}

pub const fn header_for(region: Region) -> JurisdictionHeader {
    match region {
        Region::Acre => header(
            "Estado do Acre",
            "Secretaria de Estado de Justiça e Segurança Pública",
            "Polícia Militar do Acre",
        ),
        Region::Amapa => header(
            "Estado do Amapá",
            "Secretaria de Estado da Justiça e Segurança Pública",
            "Polícia Militar do Amapá",
        ),
        Region::Amazonas => header(
            "Estado do Amazonas",
            "Secretaria de Estado de Segurança Pública",
            "Polícia Militar do Amazonas",
        ),
        Region::Para => header(
            "Estado do Pará",
            "Secretaria de Estado de Segurança Pública e Defesa Social",
            "Polícia Militar do Pará",
        ),
        Region::Rondonia => header(
            "Estado de Rondônia",
            "Secretaria de Estado da Segurança, Defesa e Cidadania",
            "Polícia Militar do Estado de Rondônia",
        ),
        Region::Roraima => header(
            "Estado de Roraima",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar de Roraima",
        ),
        Region::Tocantins => header(
            "Estado do Tocantins",
            "Secretaria da Segurança Pública",
            "Polícia Militar do Tocantins",
        ),
        Region::Alagoas => header(
            "Estado de Alagoas",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar de Alagoas",
        ),
        Region::Bahia => header(
            "Estado da Bahia",
            "Secretaria de Segurança Pública",
            "Polícia Militar da Bahia",
        ),
        Region::Ceara => header(
            "Estado do Ceará",
            "Secretaria da Segurança Pública e Defesa Social",
            "Polícia Militar do Ceará",
        ),
        Region::Maranhao => header(
            "Estado do Maranhão",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar do Maranhão",
        ),
        Region::Paraiba => header(
            "Estado da Paraíba",
            "Secretaria de Estado da Segurança e da Defesa Social",
            "Polícia Militar da Paraíba",
        ),
        Region::Pernambuco => header(
            "Estado de Pernambuco",
            "Secretaria de Defesa Social",
            "Polícia Militar de Pernambuco",
        ),
        Region::Piaui => header(
            "Estado do Piauí",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar do Piauí",
        ),
        Region::RioGrandeDoNorte => header(
            "Estado do Rio Grande do Norte",
            "Secretaria de Estado da Segurança Pública e da Defesa Social",
            "Polícia Militar do Rio Grande do Norte",
        ),
        Region::Sergipe => header(
            "Estado de Sergipe",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar do Estado de Sergipe",
        ),
        Region::Goias => header(
            "Estado de Goiás",
            "Secretaria de Estado de Segurança Pública",
            "Polícia Militar do Estado de Goiás",
        ),
        Region::MatoGrosso => header(
            "Estado de Mato Grosso",
            "Secretaria de Estado de Segurança Pública",
            "Polícia Militar do Estado de Mato Grosso",
        ),
        Region::MatoGrossoDoSul => header(
            "Estado de Mato Grosso do Sul",
            "Secretaria de Estado de Justiça e Segurança Pública",
            "Polícia Militar de Mato Grosso do Sul",
        ),
        Region::DistritoFederal => header(
            "Distrito Federal",
            "Secretaria de Estado de Segurança Pública do Distrito Federal",
            "Polícia Militar do Distrito Federal",
        ),
        Region::EspiritoSanto => header(
            "Estado do Espírito Santo",
            "Secretaria de Estado da Segurança Pública e Defesa Social",
            "Polícia Militar do Espírito Santo",
        ),
        Region::MinasGerais => header(
            "Estado de Minas Gerais",
            "Secretaria de Estado de Justiça e Segurança Pública",
            "Polícia Militar de Minas Gerais",
        ),
        Region::RioDeJaneiro => header(
            "Estado do Rio de Janeiro",
            "Secretaria de Estado de Polícia Militar",
            "Polícia Militar do Estado do Rio de Janeiro",
        ),
        Region::SaoPaulo => header(
            "Estado de São Paulo",
            "Secretaria da Segurança Pública",
            "Polícia Militar do Estado de São Paulo",
        ),
        Region::Parana => header(
            "Estado do Paraná",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar do Paraná",
        ),
        Region::SantaCatarina => header(
            "Estado de Santa Catarina",
            "Secretaria de Estado da Segurança Pública",
            "Polícia Militar de Santa Catarina",
        ),
        Region::RioGrandeDoSul => header(
            "Estado do Rio Grande do Sul",
            "Secretaria de Segurança Pública",
            "Brigada Militar",
        ),
    }
}
