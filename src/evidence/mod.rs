//! Pipeline de evidências: normalização, pontuação e renderização.
//!
//! ```text
//! raw backend items ─► EvidenceNormalizer ─► EvidenceReport (TrustScorer) ─► ReportFormatter
//! ```
//!
//! Nada neste módulo falha: itens malformados são descartados, descrição
//! ausente vira string vazia e um relatório vazio ainda renderiza uma
//! mensagem explicativa.

mod formatter;
mod normalizer;
mod scorer;

pub use formatter::{RenderStyle, ReportFormatter, CROSS_CHECK_INSTRUCTION, NO_EVIDENCE_BULLET};
pub use normalizer::EvidenceNormalizer;
pub use scorer::{
    TrustBand, TrustScore, TrustScorer, HIGH_THRESHOLD, MAX_SCORE, MEDIUM_THRESHOLD,
    POINTS_PER_ITEM,
};

use serde::{Deserialize, Serialize};

use crate::sources::EvidenceSource;

/// Um resultado de busca normalizado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceItem {
    pub title: String,
    pub description: String,
}

impl EvidenceItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Itens de uma fonte mais a confiança derivada deles.
///
/// Montado uma vez por request e nunca alterado depois.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceReport {
    items: Vec<EvidenceItem>,
    trust: TrustScore,
    source_type: String,
}

impl EvidenceReport {
    /// Pontua `items` com o peso de `source`.
    pub fn build(source: &EvidenceSource, items: Vec<EvidenceItem>) -> Self {
        let trust = TrustScorer::score(items.len(), source.weight);

        Self {
            items,
            trust,
            source_type: source.source_type_label.clone(),
        }
    }

    /// Itens na ordem de relevância do backend.
    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    pub fn score(&self) -> u8 {
        self.trust.score
    }

    pub fn band(&self) -> TrustBand {
        self.trust.band
    }

    pub fn trust(&self) -> TrustScore {
        self.trust
    }

    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
