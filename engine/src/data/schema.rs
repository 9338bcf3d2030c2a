// Upload schema: column names (post header normalization), sentinel tokens,
// and the per-column cleaning classification. Every sentinel comparison in
// the pipeline goes through the constants here, exact match only.

pub const COL_PRIMARY_KEY: &str = "chaveprimaria";
pub const COL_TAX_ID: &str = "cpf_cnpj";
pub const COL_COMPANY_NAME: &str = "empresa_por_cnpj";
pub const COL_MUNICIPALITY: &str = "município";
pub const COL_STATE: &str = "uf";
pub const COL_ROYALTY: &str = "totalvalorrecolhido";
pub const COL_VOLUME: &str = "totalquantidadecomercializada";
pub const COL_SUBSTANCE: &str = "substanciamaiscomercializada";
pub const COL_SECTOR: &str = "setor";
pub const COL_GROUP: &str = "pai";
pub const COL_STRATEGY: &str = "tec";
pub const COL_SCOPE_CODE: &str = "primeiro_escopo";
pub const COL_DURATION: &str = "duração";
pub const COL_TOTAL_SCOPES: &str = "total_escopos";
pub const COL_SCOPE_VALUE: &str = "valor";
pub const COL_MONTHLY_VALUE: &str = "valor_total_mensal";
pub const COL_OUTSOURCES: &str = "terceiriza_lavra?";

/// Every recognized column, in canonical order. All are required; a missing
/// one fails the load before anything is committed.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    COL_PRIMARY_KEY,
    COL_TAX_ID,
    COL_COMPANY_NAME,
    COL_MUNICIPALITY,
    COL_STATE,
    COL_ROYALTY,
    COL_VOLUME,
    COL_SUBSTANCE,
    COL_SECTOR,
    COL_GROUP,
    COL_STRATEGY,
    COL_SCOPE_CODE,
    COL_DURATION,
    COL_TOTAL_SCOPES,
    COL_SCOPE_VALUE,
    COL_MONTHLY_VALUE,
    COL_OUTSOURCES,
];

/// Redundant source columns dropped by exact name, plus the spreadsheet
/// check-column family dropped by prefix. Both are documented in the README.
pub const IGNORED_COLUMNS: [&str; 2] = ["empresa_cpf_cnpj", "cfem_(porte)"];
pub const IGNORED_PREFIX: &str = "check";

/// Tokens that mean "missing" in the source file.
pub const MISSING_TOKENS: [&str; 2] = ["#N/D", "#N/A"];

/// Scope code meaning "no commercial contract mapped".
pub const NOT_MAPPED: &str = "NÃO";

pub const OUTSOURCES_YES: &str = "SIM";
pub const OUTSOURCES_NO: &str = "NÃO";

/// Controlling-group values meaning "no group" or "outside scope". The
/// source spells these in several casings; the list carries each one
/// verbatim so matching stays exact.
pub const GROUP_SENTINELS: [&str; 6] = ["NA", "FORA", "na", "fora", "Na", "Fora"];

/// Highest-numbered (least specific) strategy tier; tiers above it are
/// absorbed into it during normalization.
pub const STRATEGY_CATCH_ALL: &str = "TEC05";
const STRATEGY_PREFIX: &str = "TEC";
const STRATEGY_MAX_TIER: u32 = 5;

pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

pub fn is_known_column(name: &str) -> bool {
    REQUIRED_COLUMNS.contains(&name)
}

pub fn is_ignored_column(name: &str) -> bool {
    IGNORED_COLUMNS.contains(&name) || name.starts_with(IGNORED_PREFIX)
}

/// True for an empty field or a `#N/D`-style token (already trimmed).
pub fn is_missing_token(value: &str) -> bool {
    value.is_empty() || MISSING_TOKENS.contains(&value)
}

pub fn is_sentinel_group(group: &str) -> bool {
    group.is_empty() || GROUP_SENTINELS.contains(&group)
}

/// Collapses strategy tiers above TEC05 into TEC05; everything else is
/// returned unchanged.
pub fn normalize_strategy(value: &str) -> String {
    if let Some(digits) = value.strip_prefix(STRATEGY_PREFIX) {
        if let Ok(tier) = digits.parse::<u32>() {
            if tier > STRATEGY_MAX_TIER {
                return STRATEGY_CATCH_ALL.to_string();
            }
        }
    }
    value.to_string()
}
