//! Pontuação de confiança.
//!
//! Cada item que corrobora vale 25 pontos, escalados pelo peso da fonte
//! e limitados a 100. A pontuação depende só da contagem e do peso,
//! nunca do conteúdo dos itens.

use serde::{Deserialize, Serialize};

use crate::sources::weight_to_hundredths;

/// Pontos de um item com peso 1.0.
pub const POINTS_PER_ITEM: u64 = 25;

/// Teto da pontuação.
pub const MAX_SCORE: u8 = 100;

/// Menor pontuação da faixa alta.
pub const HIGH_THRESHOLD: u8 = 80;

/// Menor pontuação da faixa média.
pub const MEDIUM_THRESHOLD: u8 = 50;

/// Faixa de veredito derivada da pontuação.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrustBand {
    High,
    Medium,
    Low,
}

impl TrustBand {
    /// Faixa de uma pontuação: `>= 80` alta, `50..80` média, abaixo de 50 baixa.
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            TrustBand::High
        } else if score >= MEDIUM_THRESHOLD {
            TrustBand::Medium
        } else {
            TrustBand::Low
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TrustBand::High => "🟢",
            TrustBand::Medium => "🟡",
            TrustBand::Low => "🔴",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrustBand::High => "신뢰도 높음",
            TrustBand::Medium => "신뢰도 보통",
            TrustBand::Low => "신뢰도 낮음 (추가 확인 필요)",
        }
    }
}

impl std::fmt::Display for TrustBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon(), self.label())
    }
}

/// Par pontuação e faixa.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrustScore {
    /// 0-100.
    pub score: u8,
    pub band: TrustBand,
}

/// Função de pontuação pura.
pub struct TrustScorer;

impl TrustScorer {
    /// `min(round(count * 25 * weight), 100)`.
    ///
    /// O peso é usado em centésimos exatos para que a pontuação não dependa
    /// da representação em ponto flutuante (`3 * 25 * 1.1` é exatamente 82.5).
    pub fn score(count: usize, weight: f64) -> TrustScore {
        Self::score_hundredths(count, weight_to_hundredths(weight))
    }

    /// Igual a [`TrustScorer::score`], com o peso já em centésimos.
    ///
    /// Arredonda meio para par, antes de aplicar o teto.
    pub fn score_hundredths(count: usize, weight_hundredths: u64) -> TrustScore {
        let raw = (count as u64)
            .saturating_mul(POINTS_PER_ITEM)
            .saturating_mul(weight_hundredths);

        let rounded = round_half_even(raw, 100);
        let score = rounded.min(u64::from(MAX_SCORE)) as u8;

        TrustScore {
            score,
            band: TrustBand::from_score(score),
        }
    }
}

fn round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    match (remainder * 2).cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient % 2),
    }
}
