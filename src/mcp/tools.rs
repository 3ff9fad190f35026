//! Registro das ferramentas MCP.
//!
//! Cada ferramenta é uma [`EvidenceSource`] habilitada. O registro é uma
//! tabela `nome da ferramenta -> (fonte, descrição)` mais um backend por
//! [`BackendKind`]; o despacho é guiado pela tabela, sem um ramo por
//! ferramenta.
//!
//! Ferramentas padrão:
//!
//! 1. `search_news_fact` - Notícias da imprensa
//! 2. `query_public_data` - Documentos oficiais do governo
//! 3. `verify_rumor_db` - Bases de checagem existentes
//! 4. `extract_scientific_paper` - Material acadêmico

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use uuid::Uuid;

use crate::backends::{build_http_client, CustomSearchBackend, NaverNewsBackend, SearchBackend};
use crate::evidence::{EvidenceNormalizer, EvidenceReport, RenderStyle, ReportFormatter};
use crate::sources::{BackendKind, EvidenceSource};
use crate::types::config::Config;
use crate::{FactCheckError, FactCheckResult};

use super::protocol::{ToolDescription, ToolResult};

/// Instrução de formato de veredito anexada à descrição de cada ferramenta.
pub const VERDICT_FORMAT_INSTRUCTION: &str = "[필수 응답 형식] 최종 답변은 반드시 \
'판정: 사실 / 대체로 사실 / 판단 유보 / 대체로 거짓 / 거짓' 중 하나로 시작하고, \
신뢰도 점수와 함께 근거 자료를 출처와 함께 인용하세요.";

/// Texto devolvido quando o backend da ferramenta não tem credenciais.
pub const API_KEY_NOT_CONFIGURED: &str = "API 키가 설정되지 않았습니다. 환경 변수 또는 설정 파일의 [credentials] 항목을 확인하세요.";

/// Texto para nomes de ferramenta fora do catálogo.
pub fn unknown_tool_message(name: &str) -> String {
    format!("Unknown tool: {}", name)
}

/// Uma linha da tabela de ferramentas.
struct ToolEntry {
    source: EvidenceSource,
    description: ToolDescription,
}

/// Registro das ferramentas expostas pelo servidor.
///
/// Somente leitura depois de construído; compartilhado entre requests.
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
    backends: HashMap<BackendKind, Arc<dyn SearchBackend>>,
}

impl ToolRegistry {
    /// Cria o registro com as fontes habilitadas e os backends HTTP reais.
    pub fn from_config(config: &Config) -> FactCheckResult<Self> {
        let client = build_http_client(config)?;

        let backends: Vec<Arc<dyn SearchBackend>> = vec![
            Arc::new(NaverNewsBackend::from_config(client.clone(), config)),
            Arc::new(CustomSearchBackend::from_config(client, config)),
        ];

        Ok(Self::with_backends(
            config.enabled_sources().cloned(),
            backends,
        ))
    }

    /// Cria o registro com backends arbitrários.
    ///
    /// Fontes desabilitadas são ignoradas; a ordem de declaração é mantida.
    /// Um nome de ferramenta repetido mantém a primeira ocorrência.
    pub fn with_backends(
        sources: impl IntoIterator<Item = EvidenceSource>,
        backends: Vec<Arc<dyn SearchBackend>>,
    ) -> Self {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for source in sources.into_iter().filter(|s| s.enabled) {
            if index.contains_key(&source.tool_name) {
                tracing::warn!(tool = %source.tool_name, "Duplicate tool name ignored");
                continue;
            }

            index.insert(source.tool_name.clone(), entries.len());
            entries.push(ToolEntry {
                description: Self::describe(&source),
                source,
            });
        }

        let backends = backends
            .into_iter()
            .map(|backend| (backend.kind(), backend))
            .collect();

        Self {
            entries,
            index,
            backends,
        }
    }

    /// Descrição MCP de uma fonte.
    fn describe(source: &EvidenceSource) -> ToolDescription {
        ToolDescription::new(
            source.tool_name.clone(),
            format!("{}\n\n{}", source.tool_summary, VERDICT_FORMAT_INSTRUCTION),
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    /// Lista as ferramentas disponíveis, na ordem do catálogo.
    pub fn list_tools(&self) -> Vec<ToolDescription> {
        self.entries.iter().map(|e| e.description.clone()).collect()
    }

    /// Fonte associada a uma ferramenta.
    pub fn source(&self, tool_name: &str) -> Option<&EvidenceSource> {
        self.index.get(tool_name).map(|&i| &self.entries[i].source)
    }

    /// Fontes registradas, na ordem do catálogo.
    pub fn sources(&self) -> impl Iterator<Item = &EvidenceSource> {
        self.entries.iter().map(|e| &e.source)
    }

    /// Backend que atende um tipo de provedor.
    pub fn backend(&self, kind: BackendKind) -> Option<&Arc<dyn SearchBackend>> {
        self.backends.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Executa uma ferramenta e devolve o texto formatado.
    ///
    /// Nunca falha: ferramenta desconhecida, credenciais ausentes e erros de
    /// backend viram texto dentro de um resultado de sucesso.
    pub async fn call(&self, name: &str, query: &str, style: RenderStyle) -> ToolResult {
        let call_id = Uuid::new_v4();

        let Some(source) = self.source(name) else {
            tracing::warn!(tool = name, %call_id, "Unknown tool requested");
            return ToolResult::text(unknown_tool_message(name));
        };

        tracing::info!(
            tool = name,
            %call_id,
            source = %source.name,
            style = %style,
            "Processing tool call"
        );

        let started = Instant::now();

        let text = match self.gather(source, query).await {
            Ok(report) => {
                tracing::info!(
                    tool = name,
                    %call_id,
                    items = report.items().len(),
                    score = report.score(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Tool call completed"
                );
                ReportFormatter::render(&report, source, style)
            }
            Err(e) if e.is_configuration() => {
                tracing::warn!(tool = name, %call_id, error = %e, "Backend not configured");
                API_KEY_NOT_CONFIGURED.to_string()
            }
            Err(e) => {
                tracing::warn!(tool = name, %call_id, error = %e, "Backend call failed");
                format!("{} 오류: {}", source.error_label, e)
            }
        };

        ToolResult::text(text)
    }

    /// Consulta o backend da fonte e monta o relatório.
    ///
    /// Credenciais ausentes são detectadas antes de qualquer I/O.
    pub async fn gather(
        &self,
        source: &EvidenceSource,
        query: &str,
    ) -> FactCheckResult<EvidenceReport> {
        let backend = self.backend(source.backend).ok_or_else(|| {
            FactCheckError::backend(source.backend.as_str(), "no backend registered")
        })?;

        if !backend.is_configured() {
            return Err(FactCheckError::MissingCredentials {
                backend: backend.name().to_string(),
            });
        }

        let backend_query = source.build_query(query);
        let raw = backend.search(&backend_query, source.item_cap).await?;
        let items = EvidenceNormalizer::normalize(&raw, source.backend, source.item_cap);

        Ok(EvidenceReport::build(source, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::TrustBand;
    use crate::sources::default_sources;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Backend em memória que registra as queries recebidas.
    struct FixedBackend {
        kind: BackendKind,
        configured: bool,
        items: Vec<Value>,
        fail: bool,
        queries: Mutex<Vec<(String, usize)>>,
    }

    impl FixedBackend {
        fn new(kind: BackendKind, items: Vec<Value>) -> Self {
            Self {
                kind,
                configured: true,
                items,
                fail: false,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchBackend for FixedBackend {
        fn name(&self) -> &str {
            self.kind.as_str()
        }

        fn kind(&self) -> BackendKind {
            self.kind
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn search(&self, query: &str, cap: usize) -> FactCheckResult<Vec<Value>> {
            self.queries.lock().unwrap().push((query.to_string(), cap));
            if self.fail {
                return Err(FactCheckError::BackendTimeout {
                    backend: self.name().to_string(),
                });
            }
            Ok(self.items.iter().take(cap).cloned().collect())
        }
    }

    fn snippets(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({"title": format!("<b>문서</b> {}", i), "snippet": "줄1\n줄2"}))
            .collect()
    }

    fn registry(news: FixedBackend, search: FixedBackend) -> (ToolRegistry, Arc<FixedBackend>) {
        let search = Arc::new(search);
        let backends: Vec<Arc<dyn SearchBackend>> = vec![Arc::new(news), search.clone()];
        let registry = ToolRegistry::with_backends(default_sources(), backends);
        (registry, search)
    }

    #[test]
    fn test_list_tools() {
        let (registry, _) = registry(
            FixedBackend::new(BackendKind::NaverNews, vec![]),
            FixedBackend::new(BackendKind::CustomSearch, vec![]),
        );

        let names: Vec<String> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "search_news_fact",
                "query_public_data",
                "verify_rumor_db",
                "extract_scientific_paper"
            ]
        );

        for tool in registry.list_tools() {
            assert!(tool.description.contains(VERDICT_FORMAT_INSTRUCTION));
            assert_eq!(tool.input_schema["required"], json!(["query"]));
            assert_eq!(tool.input_schema["properties"]["query"]["type"], "string");
        }
    }

    #[test]
    fn test_disabled_source_is_not_listed() {
        let mut sources = default_sources();
        sources[3].enabled = false;

        let registry = ToolRegistry::with_backends(sources, vec![]);
        assert_eq!(registry.len(), 3);
        assert!(registry.source("extract_scientific_paper").is_none());
    }

    #[test]
    fn test_duplicate_tool_keeps_first() {
        let mut sources = default_sources();
        let mut dup = sources[0].clone();
        dup.name = "news_copy".to_string();
        sources.push(dup);

        let registry = ToolRegistry::with_backends(sources, vec![]);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.source("search_news_fact").unwrap().name, "news");
    }

    #[tokio::test]
    async fn test_call_gov_scores_high() {
        let (registry, search) = registry(
            FixedBackend::new(BackendKind::NaverNews, vec![]),
            FixedBackend::new(BackendKind::CustomSearch, snippets(5)),
        );

        let result = registry
            .call("query_public_data", "공시가격", RenderStyle::Badge)
            .await;
        let text = result.first_text().unwrap();

        assert!(text.starts_with("## 🟢 신뢰도 높음 (90점)"));
        assert!(text.contains("- **문서 0**\n  - 줄1 줄2"));

        let queries = search.queries.lock().unwrap();
        assert_eq!(queries.as_slice(), &[("site:go.kr 공시가격".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_gather_report() {
        let (registry, _) = registry(
            FixedBackend::new(BackendKind::NaverNews, vec![]),
            FixedBackend::new(BackendKind::CustomSearch, snippets(3)),
        );

        let source = registry.source("extract_scientific_paper").unwrap().clone();
        let report = registry.gather(&source, "mRNA").await.unwrap();

        assert_eq!(report.items().len(), 2);
        assert_eq!(report.score(), 65);
        assert_eq!(report.band(), TrustBand::Medium);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::with_backends(default_sources(), vec![]);
        let result = registry.call("nope", "x", RenderStyle::Directive).await;
        assert_eq!(result.first_text(), Some("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn test_call_without_credentials_skips_search() {
        let mut unconfigured = FixedBackend::new(BackendKind::CustomSearch, snippets(3));
        unconfigured.configured = false;

        let (registry, search) = registry(
            FixedBackend::new(BackendKind::NaverNews, vec![]),
            unconfigured,
        );

        let result = registry
            .call("verify_rumor_db", "소문", RenderStyle::Directive)
            .await;

        assert_eq!(result.first_text(), Some(API_KEY_NOT_CONFIGURED));
        assert!(search.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_call_backend_failure_is_text() {
        let mut failing = FixedBackend::new(BackendKind::NaverNews, vec![]);
        failing.fail = true;

        let (registry, _) = registry(failing, FixedBackend::new(BackendKind::CustomSearch, vec![]));

        let result = registry
            .call("search_news_fact", "백신", RenderStyle::Directive)
            .await;
        let text = result.first_text().unwrap();

        assert!(text.starts_with("뉴스 검색 오류: "));
        assert!(text.contains("Timed out"));
    }

    #[tokio::test]
    async fn test_call_without_registered_backend() {
        let registry = ToolRegistry::with_backends(default_sources(), vec![]);
        let result = registry
            .call("search_news_fact", "백신", RenderStyle::Badge)
            .await;
        assert!(result.first_text().unwrap().starts_with("뉴스 검색 오류: "));
    }
}
