use anyhow::{Result, anyhow};
use folio_core::{CancelToken, ChatRequest, LlmConfig, LlmResponse, StreamCallback, StreamChunk};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, RETRY_AFTER};
use serde_json::{Value, json};
use std::io::BufRead;
use std::thread;
use std::time::Duration;

pub trait LlmClient {
    /// Single-shot completion: the full answer in one response.
    fn complete(&self, req: &ChatRequest) -> Result<LlmResponse>;

    /// Streaming variant that invokes `cb` for each fragment as it arrives.
    /// Returns the fully assembled `LlmResponse` once the stream ends. A
    /// cancelled token stops the read loop; whatever accumulated so far comes
    /// back with finish reason `"cancelled"`.
    fn complete_streaming(
        &self,
        req: &ChatRequest,
        cb: StreamCallback,
        cancel: &CancelToken,
    ) -> Result<LlmResponse>;
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct HttpLlmClient {
    cfg: LlmConfig,
    client: Client,
}

impl HttpLlmClient {
    pub fn new(cfg: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;
        Ok(Self { cfg, client })
    }

    fn resolve_api_key(&self) -> Result<String> {
        std::env::var(&self.cfg.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.cfg.api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "no API key configured; set {} or llm.api_key in config",
                    self.cfg.api_key_env
                )
            })
    }

    fn build_payload(&self, req: &ChatRequest, stream: bool) -> Result<Value> {
        let mut payload = json!({
            "model": req.model,
            "messages": serde_json::to_value(&req.messages)?,
            "max_tokens": req.max_tokens,
            "stream": stream,
        });
        if let Some(temperature) = req.temperature {
            payload["temperature"] = json!(temperature);
        }
        Ok(payload)
    }

    fn complete_inner(&self, req: &ChatRequest, api_key: &str) -> Result<LlmResponse> {
        let payload = self.build_payload(req, false)?;

        let mut last_err: Option<anyhow::Error> = None;
        let mut attempt: u8 = 0;
        while attempt <= self.cfg.max_retries {
            let response = self
                .client
                .post(&self.cfg.endpoint)
                .bearer_auth(api_key)
                .json(&payload)
                .send();

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    let retry_after = parse_retry_after_seconds(resp.headers().get(RETRY_AFTER));
                    let body = resp.text()?;
                    if status.is_success() {
                        return parse_non_streaming_payload(&body);
                    }
                    last_err = Some(format_api_error(status, &body));
                    if should_retry_status(status) && attempt < self.cfg.max_retries {
                        thread::sleep(retry_delay(self.cfg.retry_base_ms, attempt, retry_after));
                        attempt = attempt.saturating_add(1);
                        continue;
                    }
                    break;
                }
                Err(e) => {
                    last_err = Some(anyhow!("transport error: {e}"));
                    if attempt < self.cfg.max_retries {
                        thread::sleep(retry_delay(self.cfg.retry_base_ms, attempt, None));
                        attempt = attempt.saturating_add(1);
                        continue;
                    }
                    break;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow!("completion request failed without detailed error")))
    }

    fn complete_streaming_inner(
        &self,
        req: &ChatRequest,
        api_key: &str,
        cb: StreamCallback,
        cancel: &CancelToken,
    ) -> Result<LlmResponse> {
        let payload = self.build_payload(req, true)?;

        let mut last_err: Option<anyhow::Error> = None;
        let mut attempt: u8 = 0;
        while attempt <= self.cfg.max_retries {
            let response = self
                .client
                .post(&self.cfg.endpoint)
                .bearer_auth(api_key)
                .json(&payload)
                .send();

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    let retry_after = parse_retry_after_seconds(resp.headers().get(RETRY_AFTER));

                    if status.is_success() {
                        let mut content_out = String::new();
                        let mut finish_reason: Option<String> = None;
                        let mut cancelled = false;

                        let reader = std::io::BufReader::new(resp);
                        for line_result in reader.lines() {
                            if cancel.is_cancelled() {
                                cancelled = true;
                                break;
                            }
                            let line = match line_result {
                                Ok(l) => l,
                                Err(e) => {
                                    last_err = Some(anyhow!("stream read error: {e}"));
                                    break;
                                }
                            };
                            let trimmed = line.trim();
                            if !trimmed.starts_with("data:") {
                                continue;
                            }
                            let chunk = trimmed.trim_start_matches("data:").trim();
                            if chunk == "[DONE]" {
                                cb(StreamChunk::Done);
                                break;
                            }
                            let value: Value = match serde_json::from_str(chunk) {
                                Ok(v) => v,
                                Err(_) => continue,
                            };
                            let Some(choice) = first_choice(&value) else {
                                continue;
                            };
                            if let Some(reason) =
                                choice.get("finish_reason").and_then(|v| v.as_str())
                            {
                                finish_reason = Some(reason.to_string());
                            }
                            if let Some(content) = choice
                                .get("delta")
                                .and_then(|d| d.get("content"))
                                .and_then(|v| v.as_str())
                            {
                                content_out.push_str(content);
                                cb(StreamChunk::ContentDelta(content.to_string()));
                            }
                            // Some servers send a final non-delta message.
                            if let Some(content) = choice
                                .get("message")
                                .and_then(|m| m.get("content"))
                                .and_then(|v| v.as_str())
                            {
                                content_out.push_str(content);
                                cb(StreamChunk::ContentDelta(content.to_string()));
                            }
                        }

                        if let Some(err) = last_err.take() {
                            return Err(err);
                        }
                        let finish_reason = if cancelled {
                            "cancelled".to_string()
                        } else {
                            finish_reason.unwrap_or_else(|| "stop".to_string())
                        };
                        return Ok(LlmResponse {
                            text: content_out,
                            finish_reason,
                        });
                    }

                    let body = resp.text().unwrap_or_default();
                    last_err = Some(format_api_error(status, &body));
                    if should_retry_status(status) && attempt < self.cfg.max_retries {
                        thread::sleep(retry_delay(self.cfg.retry_base_ms, attempt, retry_after));
                        attempt = attempt.saturating_add(1);
                        continue;
                    }
                    break;
                }
                Err(e) => {
                    last_err = Some(anyhow!("transport error: {e}"));
                    if attempt < self.cfg.max_retries {
                        thread::sleep(retry_delay(self.cfg.retry_base_ms, attempt, None));
                        attempt = attempt.saturating_add(1);
                        continue;
                    }
                    break;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow!("streaming request failed without detailed error")))
    }
}

impl LlmClient for HttpLlmClient {
    fn complete(&self, req: &ChatRequest) -> Result<LlmResponse> {
        let api_key = self.resolve_api_key()?;
        self.complete_inner(req, &api_key)
    }

    fn complete_streaming(
        &self,
        req: &ChatRequest,
        cb: StreamCallback,
        cancel: &CancelToken,
    ) -> Result<LlmResponse> {
        let api_key = self.resolve_api_key()?;
        self.complete_streaming_inner(req, &api_key, cb, cancel)
    }
}

fn first_choice(value: &Value) -> Option<&Value> {
    value
        .get("choices")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
}

/// Assemble a response from a full SSE body. Used when a server ignores the
/// stream flag and for tests.
pub fn parse_streaming_payload(body: &str) -> Result<LlmResponse> {
    let mut text = String::new();
    let mut finish_reason: Option<String> = None;
    for line in body.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with("data:") {
            continue;
        }
        let chunk = trimmed.trim_start_matches("data:").trim();
        if chunk == "[DONE]" {
            break;
        }
        let value: Value = match serde_json::from_str(chunk) {
            Ok(v) => v,
            Err(_) => continue,
        };
        let Some(choice) = first_choice(&value) else {
            continue;
        };
        if let Some(reason) = choice.get("finish_reason").and_then(|v| v.as_str()) {
            finish_reason = Some(reason.to_string());
        }
        if let Some(content) = choice
            .get("delta")
            .and_then(|d| d.get("content"))
            .and_then(|v| v.as_str())
        {
            text.push_str(content);
        }
    }
    Ok(LlmResponse {
        text,
        finish_reason: finish_reason.unwrap_or_else(|| "stop".to_string()),
    })
}

pub fn parse_non_streaming_payload(body: &str) -> Result<LlmResponse> {
    let value: Value = serde_json::from_str(body)?;
    let choice =
        first_choice(&value).ok_or_else(|| anyhow!("completion response has no choices"))?;
    let text = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let finish_reason = choice
        .get("finish_reason")
        .and_then(|v| v.as_str())
        .unwrap_or("stop")
        .to_string();
    Ok(LlmResponse {
        text,
        finish_reason,
    })
}

fn should_retry_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn parse_retry_after_seconds(header: Option<&HeaderValue>) -> Option<u64> {
    header?.to_str().ok()?.trim().parse().ok()
}

fn retry_delay(base_ms: u64, attempt: u8, retry_after_secs: Option<u64>) -> Duration {
    if let Some(secs) = retry_after_secs {
        return Duration::from_secs(secs);
    }
    Duration::from_millis(base_ms.saturating_mul(1u64 << attempt.min(16)))
}

fn format_api_error(status: StatusCode, body: &str) -> anyhow::Error {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.chars().take(200).collect());
    anyhow!("completion API error {status}: {detail}")
}
