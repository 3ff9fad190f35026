//! Converte itens brutos dos provedores em [`EvidenceItem`]s.

use serde_json::Value;

use crate::sources::BackendKind;

use super::EvidenceItem;

const EMPHASIS_TAGS: [&str; 2] = ["<b>", "</b>"];

/// Normalizador de resultados brutos dos backends.
pub struct EvidenceNormalizer;

impl EvidenceNormalizer {
    /// Normaliza até `cap` itens, mantendo a ordem de relevância do provedor.
    ///
    /// Itens ilegíveis são pulados; o limite conta só itens válidos.
    pub fn normalize(raw: &[Value], kind: BackendKind, cap: usize) -> Vec<EvidenceItem> {
        let items: Vec<EvidenceItem> = raw
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let item = Self::normalize_item(value, kind);
                if item.is_none() {
                    tracing::debug!(backend = %kind, index, "Skipping malformed result item");
                }
                item
            })
            .take(cap)
            .collect();

        tracing::debug!(
            backend = %kind,
            raw = raw.len(),
            kept = items.len(),
            cap,
            "Normalized results"
        );

        items
    }

    /// Normaliza um item. `None` quando o item não tem título em string.
    pub fn normalize_item(raw: &Value, kind: BackendKind) -> Option<EvidenceItem> {
        let object = raw.as_object()?;
        let title = object.get("title")?.as_str()?;
        let description = object
            .get(kind.description_field())
            .and_then(Value::as_str)
            .unwrap_or_default();

        Some(EvidenceItem {
            title: Self::clean_text(title, false),
            description: Self::clean_text(description, kind.wraps_snippets()),
        })
    }

    /// Remove tags de ênfase, decodifica `&quot;` e opcionalmente junta linhas.
    pub fn clean_text(text: &str, collapse_newlines: bool) -> String {
        let mut cleaned = text.to_string();
        for tag in EMPHASIS_TAGS {
            cleaned = cleaned.replace(tag, "");
        }
        cleaned = cleaned.replace("&quot;", "\"");

        if collapse_newlines {
            cleaned = cleaned.replace("\r\n", " ").replace(['\n', '\r'], " ");
        }

        cleaned
    }
}
