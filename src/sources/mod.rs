//! Fontes de evidência.
//!
//! Uma [`EvidenceSource`] descreve uma categoria de corroboração: qual
//! backend consultar, como a query do chamador é restringida, quantos itens
//! ficam e quanto cada item pesa na pontuação de confiança.
//!
//! Fontes são dados puros. A tabela embutida fica em [`defaults`] e pode
//! ser trocada ou estendida pela seção `[[sources]]` do config.

mod defaults;

pub use defaults::default_sources;

use serde::{Deserialize, Serialize};

use crate::{FactCheckError, FactCheckResult};

/// Marcador substituído pela query do chamador.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Limite de `item_cap`; os dois provedores devolvem no máximo 10 itens por página.
pub const MAX_ITEM_CAP: usize = 10;

/// Provedor externo que atende uma fonte.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Busca de notícias (itens title/description com marcação de ênfase).
    NaverNews,
    /// Busca web geral restrita por site (itens title/snippet).
    CustomSearch,
}

impl BackendKind {
    /// Todos os tipos de backend, na ordem de exibição.
    pub const ALL: [BackendKind; 2] = [BackendKind::NaverNews, BackendKind::CustomSearch];

    /// Identificador estável usado em logs e erros.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::NaverNews => "naver_news",
            BackendKind::CustomSearch => "custom_search",
        }
    }

    /// Se os trechos deste provedor podem trazer quebras de linha.
    pub fn wraps_snippets(&self) -> bool {
        matches!(self, BackendKind::CustomSearch)
    }

    /// Campo com o corpo do item na resposta do provedor.
    pub fn description_field(&self) -> &'static str {
        match self {
            BackendKind::NaverNews => "description",
            BackendKind::CustomSearch => "snippet",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuração de uma fonte de evidência.
///
/// Imutável depois de carregada; compartilhada entre requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceSource {
    /// Chave única (`news`, `gov`, `factcheck_db`, `scholarly`).
    pub name: String,

    /// Nome da ferramenta no catálogo do protocolo.
    pub tool_name: String,

    /// Primeira frase da descrição da ferramenta.
    pub tool_summary: String,

    /// Filtro de escopo; `{query}` é trocado pela query do chamador.
    pub query_template: String,

    /// Provedor a consultar.
    pub backend: BackendKind,

    /// Número máximo de itens mantidos.
    pub item_cap: usize,

    /// Peso de confiabilidade usado na pontuação.
    pub weight: f64,

    /// Título usado pelos formatadores.
    pub display_name: String,

    /// Categoria da fonte, legível.
    pub source_type_label: String,

    /// Nome da operação usado em `"<operação> 오류: <mensagem>"`.
    pub error_label: String,

    /// Linha devolvida pelo estilo directive quando nada foi encontrado.
    pub empty_message: String,

    /// Rótulo do título do item no estilo directive.
    #[serde(default = "default_item_label")]
    pub item_label: String,

    /// Rótulo do corpo do item no estilo directive.
    #[serde(default = "default_body_label")]
    pub body_label: String,

    /// Se a fonte é exposta como ferramenta.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_item_label() -> String {
    "문서명".to_string()
}

fn default_body_label() -> String {
    "상세 내용".to_string()
}

fn default_true() -> bool {
    true
}

impl EvidenceSource {
    /// Monta a query do backend a partir da query do chamador.
    ///
    /// Um template sem o marcador é tratado como prefixo.
    pub fn build_query(&self, query: &str) -> String {
        if self.query_template.contains(QUERY_PLACEHOLDER) {
            self.query_template.replace(QUERY_PLACEHOLDER, query)
        } else {
            format!("{} {}", self.query_template, query)
        }
    }

    /// Peso em centésimos exatos, como usado pelo scorer.
    pub fn weight_hundredths(&self) -> u64 {
        weight_to_hundredths(self.weight)
    }

    /// Valida os invariantes de uma fonte.
    pub fn validate(&self) -> FactCheckResult<()> {
        if self.name.trim().is_empty() {
            return Err(FactCheckError::config("source name must not be empty"));
        }
        if self.tool_name.trim().is_empty() {
            return Err(FactCheckError::config(format!(
                "source '{}' has an empty tool_name",
                self.name
            )));
        }
        if self.item_cap == 0 || self.item_cap > MAX_ITEM_CAP {
            return Err(FactCheckError::config(format!(
                "source '{}' item_cap must be within 1..={}, got {}",
                self.name, MAX_ITEM_CAP, self.item_cap
            )));
        }
        if !(self.weight > 0.0 && self.weight <= 10.0) {
            return Err(FactCheckError::config(format!(
                "source '{}' weight must be within (0, 10], got {}",
                self.name, self.weight
            )));
        }
        Ok(())
    }
}

/// Converte um peso float para centésimos (`1.1` -> `110`).
///
/// Pesos têm no máximo duas casas decimais; arredondar aqui remove o ruído
/// da representação binária antes da aritmética inteira do scorer.
pub fn weight_to_hundredths(weight: f64) -> u64 {
    if weight.is_finite() && weight > 0.0 {
        (weight * 100.0).round() as u64
    } else {
        0
    }
}
