// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Offline renderer doubles for tests.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DiagramRenderer, RenderError};

/// Encodes a blank RGB PNG of the given size.
pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Replays queued outcomes, then keeps returning a fixed PNG.
pub(crate) struct StubRenderer {
    queued: Mutex<VecDeque<Result<Vec<u8>, RenderError>>>,
    sources: Mutex<Vec<String>>,
    fallback: Vec<u8>,
}

impl StubRenderer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            sources: Mutex::new(Vec::new()),
            fallback: png(width, height),
        }
    }

    pub(crate) fn then(self, outcome: Result<Vec<u8>, RenderError>) -> Self {
        self.queued.lock().expect("queue lock").push_back(outcome);
        self
    }

    pub(crate) fn sources(&self) -> Vec<String> {
        self.sources.lock().expect("sources lock").clone()
    }
}

#[async_trait]
impl DiagramRenderer for StubRenderer {
    async fn render(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        self.sources
            .lock()
            .expect("sources lock")
            .push(source.to_owned());
        let queued = self.queued.lock().expect("queue lock").pop_front();
        queued.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
