use serde::{Deserialize, Serialize};

/// Checklist section a rule is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaCategory {
    Documentacao,
    Renda,
    Familia,
    Trabalho,
    Moradia,
    Outros,
}

impl CriteriaCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Documentacao,
            Self::Renda,
            Self::Familia,
            Self::Trabalho,
            Self::Moradia,
            Self::Outros,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Documentacao => "documentacao",
            Self::Renda => "renda",
            Self::Familia => "familia",
            Self::Trabalho => "trabalho",
            Self::Moradia => "moradia",
            Self::Outros => "outros",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Documentacao => "Documentação",
            Self::Renda => "Renda",
            Self::Familia => "Família",
            Self::Trabalho => "Trabalho",
            Self::Moradia => "Moradia",
            Self::Outros => "Outras condições",
        }
    }

    /// Profile fields shown under this category. `Outros` owns no fields; it
    /// collects everything the other categories do not list.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Documentacao => &[
                "cadastradoCadunico",
                "temCpf",
                "temNis",
                "temDocumentoIdentidade",
                "tituloEleitor",
                "registroGeralPesca",
            ],
            Self::Renda => &[
                "rendaFamiliarMensal",
                "rendaPerCapita",
                "recebeBolsaFamilia",
                "recebeBpc",
                "recebeAposentadoria",
                "temRendaFormal",
            ],
            Self::Familia => &[
                "pessoasNaCasa",
                "quantidadeFilhos",
                "temCriancaMenorSeis",
                "temGestante",
                "temIdoso",
                "temPessoaComDeficiencia",
                "idade",
                "dataNascimento",
                "estadoCivil",
            ],
            Self::Trabalho => &[
                "profissao",
                "temCarteiraAssinada",
                "desempregado",
                "trabalhadorInformal",
                "mei",
                "agricultorFamiliar",
                "pescadorArtesanal",
            ],
            Self::Moradia => &[
                "temCasaPropria",
                "pagaAluguel",
                "tipoMoradia",
                "moraEmAreaRural",
                "uf",
                "municipio",
            ],
            Self::Outros => &[],
        }
    }

    /// Category for a profile field; unmapped fields land in `Outros`.
    pub fn for_field(field: &str) -> Self {
        Self::ordered()
            .into_iter()
            .find(|category| category.fields().iter().any(|known| *known == field))
            .unwrap_or(Self::Outros)
    }
}
