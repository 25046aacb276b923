//! Profile keys referenced by the engine itself.
//!
//! Catalog rules may reference any key; these are the ones with built-in
//! derivations or fixed checklist placement.

pub const CADASTRADO_CADUNICO: &str = "cadastradoCadunico";
pub const RENDA_FAMILIAR_MENSAL: &str = "rendaFamiliarMensal";
pub const RENDA_PER_CAPITA: &str = "rendaPerCapita";
pub const PESSOAS_NA_CASA: &str = "pessoasNaCasa";
pub const DATA_NASCIMENTO: &str = "dataNascimento";
pub const IDADE: &str = "idade";
pub const UF: &str = "uf";
pub const MUNICIPIO: &str = "municipio";
