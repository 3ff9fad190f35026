//! Tabela embutida de fontes de evidência.

use super::{BackendKind, EvidenceSource};

/// As quatro fontes embutidas, na ordem do catálogo.
///
/// Os pesos fixam a confiabilidade de cada fonte: resultados do governo e
/// acadêmicos chegam à faixa alta com menos itens que notícias.
pub fn default_sources() -> Vec<EvidenceSource> {
    vec![
        EvidenceSource {
            name: "news".to_string(),
            tool_name: "search_news_fact".to_string(),
            tool_summary: "언론사 뉴스를 검색하여 실시간 팩트체크 점수를 반환합니다.".to_string(),
            query_template: "{query} 팩트체크".to_string(),
            backend: BackendKind::NaverNews,
            item_cap: 3,
            weight: 0.8,
            display_name: "뉴스 실시간 검색".to_string(),
            source_type_label: "언론사 뉴스".to_string(),
            error_label: "뉴스 검색".to_string(),
            empty_message: "관련 보도를 찾지 못했습니다.".to_string(),
            item_label: "출처".to_string(),
            body_label: "보도 내용".to_string(),
            enabled: true,
        },
        EvidenceSource {
            name: "gov".to_string(),
            tool_name: "query_public_data".to_string(),
            tool_summary: "정부 공식 자료를 검색하여 매우 높은 가중치의 신뢰도 점수를 반환합니다."
                .to_string(),
            query_template: "site:go.kr {query}".to_string(),
            backend: BackendKind::CustomSearch,
            item_cap: 3,
            weight: 1.2,
            display_name: "정부 공식 자료".to_string(),
            source_type_label: "공공기관".to_string(),
            error_label: "공공데이터 조회".to_string(),
            empty_message: "관련된 정부 공식 기록을 찾지 못했습니다.".to_string(),
            item_label: "문서명".to_string(),
            body_label: "상세 내용".to_string(),
            enabled: true,
        },
        EvidenceSource {
            name: "factcheck_db".to_string(),
            tool_name: "verify_rumor_db".to_string(),
            tool_summary: "기존 팩트체크 DB와 대조하여 신뢰도 점수를 반환합니다.".to_string(),
            query_template: "site:factcheck.snu.ac.kr OR site:kakaocorp.com {query}".to_string(),
            backend: BackendKind::CustomSearch,
            item_cap: 3,
            weight: 1.1,
            display_name: "검증된 사례 대조".to_string(),
            source_type_label: "팩트체크 DB".to_string(),
            error_label: "루머 DB 검색".to_string(),
            empty_message: "기존 팩트체크 기록을 찾지 못했습니다.".to_string(),
            item_label: "문서명".to_string(),
            body_label: "상세 내용".to_string(),
            enabled: true,
        },
        EvidenceSource {
            name: "scholarly".to_string(),
            tool_name: "extract_scientific_paper".to_string(),
            tool_summary: "학술 자료 및 논문을 검색하여 가장 높은 가중치의 신뢰도 점수를 반환합니다."
                .to_string(),
            query_template: "site:scholar.google.com OR site:ncbi.nlm.nih.gov {query}".to_string(),
            backend: BackendKind::CustomSearch,
            item_cap: 2,
            weight: 1.3,
            display_name: "과학적 근거 분석".to_string(),
            source_type_label: "학술 자료".to_string(),
            error_label: "학술 자료 검색".to_string(),
            empty_message: "관련 학술 기록을 찾지 못했습니다.".to_string(),
            item_label: "문서명".to_string(),
            body_label: "상세 내용".to_string(),
            enabled: true,
        },
    ]
}
