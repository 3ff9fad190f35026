//! Backends de busca.
//!
//! Adaptadores para os provedores de busca externos. Cada um faz uma única
//! consulta por chamada, sem retries, e devolve os itens brutos.

mod base;
mod custom_search;
mod naver;

pub use base::{build_http_client, SearchBackend};
pub use custom_search::CustomSearchBackend;
pub use naver::NaverNewsBackend;
