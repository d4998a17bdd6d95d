//! Client for a local Ollama instance running a vision model
//!
//! One POST to `/api/generate` with the screenshot attached as base64; the
//! free-text answer is parsed by `opcli_core::vision`.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use opcli_core::vision::{parse_analysis_response, ImageAnalysis};

use crate::prelude::*;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

// Vision models are slow on consumer hardware.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

const SCREENSHOT_PROMPT: &str = "\
Esta é uma captura de tela de um software, terminal, IDE ou navegador.
Você é um desenvolvedor analisando um bug ou problema técnico.

Analise a imagem e forneça:
1. Um título curto (máximo 80 caracteres) descrevendo o problema ou erro
2. Uma descrição técnica do que você vê: mensagens de erro, stack traces, problemas de UI, etc.

Se houver texto de erro visível, transcreva-o exatamente.
Se for código, identifique a linguagem e o problema.

Responda em português no formato:
TITULO: <título técnico do problema>
DESCRICAO: <descrição técnica detalhada>";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct Client {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl Client {
    /// Build a client for the given model, honoring `OLLAMA_HOST`.
    pub fn new(model: &str) -> Result<Self> {
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let http = reqwest::Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .map_err(|e| eyre!("failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Send an image plus a prompt to the model and return its raw answer.
    pub async fn analyze_image(&self, image_path: &Path, prompt: &str) -> Result<String> {
        let image = tokio::fs::read(image_path)
            .await
            .map_err(|e| eyre!("failed to read image '{}': {}", image_path.display(), e))?;

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            images: vec![base64::engine::general_purpose::STANDARD.encode(image)],
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| eyre!("failed to reach Ollama: {}", e))?;

        if !response.status().is_success() {
            return Err(eyre!("Ollama returned status {}", response.status()));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| eyre!("failed to decode the Ollama response: {}", e))?;

        Ok(result.response)
    }

    /// Caption a screenshot into a title/description pair.
    pub async fn analyze_screenshot(&self, image_path: &Path) -> Result<ImageAnalysis> {
        let response = self.analyze_image(image_path, SCREENSHOT_PROMPT).await?;
        log::debug!("raw model response:\n{response}");
        Ok(parse_analysis_response(&response))
    }
}
