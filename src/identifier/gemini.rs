//! Gemini API クライアント
//!
//! 処理順:
//! 1. APIキー確認（未設定なら通信せず Configuration）
//! 2. 画像読み込み・Base64変換
//! 3. リクエスト構築・送信
//! 4. 補完テキスト抽出 → フェンス除去 → JSONパース → 正規化
//!
//! リクエスト/レスポンス変換は plant_id_common::gemini を使用

use super::PlantIdentifier;
use crate::config::Config;
use crate::error::{PlantIdError, Result};
use crate::upload::UploadedFile;
use async_trait::async_trait;
use log::{debug, info, warn};
use plant_id_common::{
    build_identification_prompt, build_request, effective_mime_type, encode_image, endpoint_url,
    extract_completion_text, extract_error_message, parse_identification_response,
    GeminiRequest, IdentificationResult, IdentifyError,
};
use std::time::{Duration, Instant};

pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
    prompt: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.timeout_seconds.map(Duration::from_secs);
        let client = Self::new(&config.api_base, &config.model, timeout)?
            .with_api_key(config.resolve_api_key())
            .with_local_language(&config.local_language);
        Ok(client)
    }

    pub fn new(api_base: &str, model: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| PlantIdError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;

        Ok(Self {
            http,
            api_base: api_base.to_string(),
            model: model.to_string(),
            api_key: None,
            prompt: build_identification_prompt(""),
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn with_local_language(mut self, language: &str) -> Self {
        self.prompt = build_identification_prompt(language);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// POSTして成功時の本文を返す
    async fn send(&self, api_key: &str, request: &GeminiRequest) -> std::result::Result<String, IdentifyError> {
        let url = endpoint_url(&self.api_base, &self.model);
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        debug!("Gemini応答: status={} {}ms {} bytes", status, start.elapsed().as_millis(), body.len());

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &body);
            warn!("Gemini APIエラー ({}): {}", status, message);
            return Err(IdentifyError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PlantIdentifier for GeminiClient {
    async fn identify(&self, file: &UploadedFile) -> std::result::Result<IdentificationResult, IdentifyError> {
        let api_key = self.api_key.as_deref().ok_or(IdentifyError::Configuration)?;

        let bytes = file.read().await?;
        let mime_type = effective_mime_type(&file.mime_type);
        let request = build_request(&self.prompt, mime_type, encode_image(&bytes));
        info!(
            "識別リクエスト: {} ({}, {} bytes, model={})",
            file.file_name,
            mime_type,
            bytes.len(),
            self.model
        );

        let body = self.send(api_key, &request).await?;
        let text = extract_completion_text(&body)?;

        let preview: String = text.chars().take(200).collect();
        debug!("補完テキスト: {}", preview);

        let result = parse_identification_response(&text).map_err(|e| {
            if let IdentifyError::Parse { detail } = &e {
                warn!("補完テキストのパースに失敗: {}", detail);
            }
            e
        })?;

        info!("識別結果: {} (confidence {})", result.common_name, result.confidence);
        Ok(result)
    }
}

/// 通信エラーを変換（URLは含めない。クエリにAPIキーがある）
fn transport_error(err: reqwest::Error) -> IdentifyError {
    if err.is_timeout() {
        return IdentifyError::Transport(
            "The AI service did not respond in time. Please try again.".to_string(),
        );
    }
    let err = err.without_url();
    warn!("Gemini通信エラー: {}", err);
    IdentifyError::Transport(format!("Could not reach the AI service: {}", err))
}
