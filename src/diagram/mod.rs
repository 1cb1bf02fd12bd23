// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid-to-PNG rendering for document diagrams.
//!
//! Rendering is delegated to a Kroki-compatible HTTP service behind the [`DiagramRenderer`]
//! trait. The adapter prepends a colour preamble, retries transient failures with exponential
//! backoff, and measures the returned image so it can be scaled to a physical width.

use std::future::Future;
use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;

use crate::model::ImageBlock;
use crate::validate::DiagramTheme;

pub const DEFAULT_ENDPOINT: &str = "https://kroki.io/mermaid/png";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Pixels per centimetre at 96 DPI.
const PX_PER_CM: f64 = 37.8;
/// English Metric Units per pixel at 96 DPI.
pub const EMU_PER_PX: u32 = 9525;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("response is not a readable image: {0}")]
    InvalidImage(String),
}

impl RenderError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::InvalidImage(_))
    }
}

/// Turns diagram source into PNG bytes.
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render(&self, source: &str) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base, 2×base, 4×base, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX))
    }
}

/// Runs `attempt` until it succeeds, fails permanently, or the retry budget is spent.
pub async fn retry_with_backoff<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, RenderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RenderError>>,
{
    let mut retry = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay_for(retry);
                tracing::warn!(error = %err, retry, delay_ms = delay.as_millis() as u64, "diagram render failed; retrying");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrokiConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for KrokiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Renders through a Kroki `POST /mermaid/png` endpoint.
#[derive(Debug, Clone)]
pub struct KrokiRenderer {
    client: reqwest::Client,
    config: KrokiConfig,
}

impl KrokiRenderer {
    pub fn new(config: KrokiConfig) -> Result<Self, RenderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| RenderError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    async fn render_once(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(source.to_owned())
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::Status {
                status: status.as_u16(),
                body: body.chars().take(100).collect(),
            });
        }
        let bytes = response.bytes().await.map_err(|err| self.classify(err))?;
        Ok(bytes.to_vec())
    }

    fn classify(&self, err: reqwest::Error) -> RenderError {
        if err.is_timeout() {
            RenderError::Timeout(self.config.timeout.as_secs())
        } else {
            RenderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl DiagramRenderer for KrokiRenderer {
    async fn render(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        retry_with_backoff(self.config.retry, || self.render_once(source)).await
    }
}

struct Palette {
    primary: &'static str,
    border: &'static str,
    secondary: &'static str,
    tertiary: &'static str,
    line: &'static str,
    text: &'static str,
}

fn palette(theme: DiagramTheme) -> Option<Palette> {
    let palette = match theme {
        DiagramTheme::Professional => Palette {
            primary: "#4a90d9",
            border: "#2d6cb5",
            secondary: "#e8f4fc",
            tertiary: "#f5f9fc",
            line: "#5c6bc0",
            text: "#333333",
        },
        DiagramTheme::Fresh => Palette {
            primary: "#52c41a",
            border: "#389e0d",
            secondary: "#f6ffed",
            tertiary: "#d9f7be",
            line: "#73d13d",
            text: "#333333",
        },
        DiagramTheme::Business => Palette {
            primary: "#595959",
            border: "#434343",
            secondary: "#fafafa",
            tertiary: "#f0f0f0",
            line: "#8c8c8c",
            text: "#262626",
        },
        DiagramTheme::Tech => Palette {
            primary: "#722ed1",
            border: "#531dab",
            secondary: "#f9f0ff",
            tertiary: "#efdbff",
            line: "#9254de",
            text: "#333333",
        },
        DiagramTheme::Warm => Palette {
            primary: "#fa8c16",
            border: "#d46b08",
            secondary: "#fff7e6",
            tertiary: "#ffe7ba",
            line: "#ffa940",
            text: "#333333",
        },
        DiagramTheme::Default => return None,
    };
    Some(palette)
}

/// Prepends the theme's Mermaid `init` directive to the trimmed source.
pub fn themed_source(source: &str, theme: DiagramTheme) -> String {
    let source = source.trim();
    let Some(p) = palette(theme) else {
        return source.to_owned();
    };
    format!(
        "%%{{init: {{'theme': 'base', 'themeVariables': {{\
         'primaryColor': '{}', 'primaryTextColor': '#ffffff', 'primaryBorderColor': '{}', \
         'secondaryColor': '{}', 'tertiaryColor': '{}', 'lineColor': '{}', 'textColor': '{}', \
         'fontSize': '14px', 'fontFamily': 'Microsoft YaHei, Arial, sans-serif'}}}}}}%%\n{source}",
        p.primary, p.border, p.secondary, p.tertiary, p.line, p.text
    )
}

/// Reads pixel dimensions from the image header.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), RenderError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| RenderError::InvalidImage(err.to_string()))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|err| RenderError::InvalidImage(err.to_string()))?;
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidImage("image has no pixels".to_owned()));
    }
    Ok((width, height))
}

/// Scales `(width, height)` pixels to `width_cm` at 96 DPI, keeping the aspect ratio.
pub fn scale_to_width(pixels: (u32, u32), width_cm: f64) -> (u32, u32) {
    let (width, height) = pixels;
    let target_width = (width_cm * PX_PER_CM).round().max(1.0);
    let target_height = (f64::from(height) * target_width / f64::from(width))
        .round()
        .max(1.0);
    (target_width as u32, target_height as u32)
}

/// Renders `source` and packages the result as a document image block.
pub async fn render_image(
    renderer: &dyn DiagramRenderer,
    source: &str,
    theme: DiagramTheme,
    width_cm: f64,
    caption: Option<String>,
) -> Result<ImageBlock, RenderError> {
    let png = renderer.render(&themed_source(source, theme)).await?;
    let (pixel_width, pixel_height) = image_dimensions(&png)?;
    let (display_width, display_height) = scale_to_width((pixel_width, pixel_height), width_cm);
    Ok(ImageBlock {
        png,
        pixel_width,
        pixel_height,
        display_width,
        display_height,
        caption,
    })
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
