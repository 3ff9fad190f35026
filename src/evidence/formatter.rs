//! Renderizações em texto de um [`EvidenceReport`].
//!
//! - **Badge**: título com a pontuação, subtítulo da fonte, um bullet por item
//!   e um rodapé de atribuição.
//! - **Directive**: lista numerada de evidências seguida de uma instrução para
//!   que o consumidor confronte os itens entre si.
//!
//! Os dois mantêm a ordem dos itens e nunca removem duplicatas.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::sources::EvidenceSource;

use super::EvidenceReport;

/// Bullet do estilo badge quando não há evidência.
pub const NO_EVIDENCE_BULLET: &str = "관련된 공신력 있는 자료를 찾지 못했습니다.";

/// Fecho do estilo directive.
pub const CROSS_CHECK_INSTRUCTION: &str = "⚠️ 위 자료들의 내용이 서로 일치하는지 교차 검증하세요. \
상충하는 내용이 있다면 판정 전에 반드시 그 사실을 명시하고, 각 근거를 출처와 함께 인용하세요.";

/// Apresentação a produzir.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Resumo no estilo badge, com a pontuação no título.
    Badge,
    /// Apresentação numerada para "citar e confrontar".
    Directive,
}

impl std::fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderStyle::Badge => write!(f, "badge"),
            RenderStyle::Directive => write!(f, "directive"),
        }
    }
}

/// Renderiza relatórios como markdown.
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn render(report: &EvidenceReport, source: &EvidenceSource, style: RenderStyle) -> String {
        match style {
            RenderStyle::Badge => Self::badge(report, source),
            RenderStyle::Directive => Self::directive(report, source),
        }
    }

    /// Estilo badge.
    pub fn badge(report: &EvidenceReport, source: &EvidenceSource) -> String {
        let mut md = String::new();
        let source_type = report.source_type();

        let _ = writeln!(md, "## {} ({}점)", report.band(), report.score());
        let _ = writeln!(md, "### 🔍 {} ({})", source.display_name, source_type);

        if report.is_empty() {
            let _ = writeln!(md, "- {}", NO_EVIDENCE_BULLET);
            return md;
        }

        for item in report.items() {
            let _ = writeln!(md, "- **{}**", item.title);
            let _ = writeln!(md, "  - {}", item.description);
        }

        let _ = write!(
            md,
            "\n> *본 점수는 {}의 검색 결과 수와 출처 가중치를 바탕으로 계산되었습니다.*",
            source_type
        );

        md
    }

    /// Estilo directive.
    pub fn directive(report: &EvidenceReport, source: &EvidenceSource) -> String {
        if report.is_empty() {
            return source.empty_message.clone();
        }

        let mut md = String::new();

        let _ = writeln!(md, "### 📂 {} ({})", source.display_name, report.source_type());
        let _ = writeln!(
            md,
            "**신뢰도 점수**: {}점 ({})\n",
            report.score(),
            report.band()
        );

        for (idx, item) in report.items().iter().enumerate() {
            let _ = writeln!(md, "{}. **{}**: {}", idx + 1, source.item_label, item.title);
            let _ = writeln!(md, "   **{}**: {}", source.body_label, item.description);
        }

        let _ = write!(md, "\n{}", CROSS_CHECK_INSTRUCTION);

        md
    }
}
