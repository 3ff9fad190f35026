//! Transporte stdio para comunicação MCP.
//!
//! Mensagens newline-delimited JSON sobre stdin/stdout:
//! - Cada mensagem é um objeto JSON-RPC 2.0 completo em uma única linha
//! - Mensagens NÃO DEVEM conter newlines embutidos
//!
//! O transporte só lida com linhas; a interpretação do JSON fica com o
//! dispatcher, que precisa do texto bruto para recuperar o `id` de
//! mensagens malformadas.
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}\n
//! {"jsonrpc":"2.0","id":1,"result":{...}}\n
//! ```

use std::io::{BufRead, BufReader, BufWriter, Stdin, Stdout, Write};

use crate::FactCheckResult;

use super::protocol::JsonRpcResponse;

/// Transporte de linhas sobre um par leitor/escritor.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// Transporte sobre stdin/stdout.
pub type StdioTransport = LineTransport<BufReader<Stdin>, BufWriter<Stdout>>;

impl LineTransport<BufReader<Stdin>, BufWriter<Stdout>> {
    /// Cria um transporte stdio.
    pub fn stdio() -> Self {
        Self::new(
            BufReader::new(std::io::stdin()),
            BufWriter::new(std::io::stdout()),
        )
    }
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Lê a próxima mensagem não vazia, como bytes brutos.
    ///
    /// Retorna `None` em EOF. Linhas em branco são ignoradas. A validação
    /// de UTF-8 fica com o parser, para que uma linha inválida receba o
    /// envelope de erro em vez de derrubar a sessão.
    pub fn read_message(&mut self) -> FactCheckResult<Option<Vec<u8>>> {
        loop {
            let mut line = Vec::new();
            let bytes_read = self.reader.read_until(b'\n', &mut line)?;

            if bytes_read == 0 {
                return Ok(None);
            }

            let trimmed = trim_ascii(&line);
            if trimmed.is_empty() {
                continue;
            }

            tracing::debug!(bytes = bytes_read, "Received message");
            return Ok(Some(trimmed.to_vec()));
        }
    }

    /// Escreve uma resposta como JSON compacto seguido de `\n`.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> FactCheckResult<()> {
        let body = serde_json::to_string(response)?;

        self.writer.write_all(body.as_bytes())?;
        self.writer.write_all(b"\n")?;
        // Sem flush o cliente fica esperando a resposta no buffer.
        self.writer.flush()?;

        tracing::debug!(
            id = %response.id,
            is_error = response.is_error(),
            "Sent response"
        );

        Ok(())
    }

    /// Devolve o escritor (usado em testes para inspecionar a saída).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
