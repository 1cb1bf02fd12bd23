// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::Cell;
use std::time::Duration;

use rstest::rstest;
use tokio::time::Instant;

use super::testing::{png, StubRenderer};
use super::{
    image_dimensions, render_image, retry_with_backoff, scale_to_width, themed_source,
    RenderError, RetryPolicy,
};
use crate::validate::DiagramTheme;

#[test]
fn default_theme_leaves_source_untouched() {
    assert_eq!(
        themed_source("  graph TD; A-->B \n", DiagramTheme::Default),
        "graph TD; A-->B"
    );
}

#[rstest]
#[case(DiagramTheme::Professional, "#4a90d9")]
#[case(DiagramTheme::Fresh, "#52c41a")]
#[case(DiagramTheme::Business, "#595959")]
#[case(DiagramTheme::Tech, "#722ed1")]
#[case(DiagramTheme::Warm, "#fa8c16")]
fn themed_source_prepends_an_init_directive(#[case] theme: DiagramTheme, #[case] primary: &str) {
    let source = themed_source("graph TD; A-->B", theme);
    let (preamble, body) = source.split_once('\n').expect("preamble line");
    assert!(preamble.starts_with("%%{init: {'theme': 'base'"));
    assert!(preamble.ends_with("}}}%%"));
    assert!(preamble.contains(primary));
    assert_eq!(body, "graph TD; A-->B");
}

#[test]
fn image_dimensions_reads_png_header() {
    assert_eq!(image_dimensions(&png(40, 20)), Ok((40, 20)));
}

#[test]
fn image_dimensions_rejects_garbage() {
    let err = image_dimensions(b"<html>not an image</html>").unwrap_err();
    assert!(matches!(err, RenderError::InvalidImage(_)));
}

#[rstest]
#[case((800, 400), 15.0, (567, 284))]
#[case((100, 100), 10.0, (378, 378))]
#[case((1000, 10), 1.0, (38, 1))]
fn scaling_keeps_aspect_ratio(
    #[case] pixels: (u32, u32),
    #[case] width_cm: f64,
    #[case] expected: (u32, u32),
) {
    assert_eq!(scale_to_width(pixels, width_cm), expected);
}

#[test]
fn backoff_doubles_from_the_base_delay() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_for(1), Duration::from_secs(1));
    assert_eq!(policy.delay_for(2), Duration::from_secs(2));
    assert_eq!(policy.delay_for(3), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried_with_backoff() {
    let attempts = Cell::new(0);
    let started = Instant::now();

    let result = retry_with_backoff(RetryPolicy::default(), || {
        attempts.set(attempts.get() + 1);
        let n = attempts.get();
        async move {
            if n < 3 {
                Err(RenderError::Timeout(15))
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(3));
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn retries_stop_after_the_budget() {
    let attempts = Cell::new(0);

    let result: Result<(), RenderError> = retry_with_backoff(RetryPolicy::default(), || {
        attempts.set(attempts.get() + 1);
        async {
            Err(RenderError::Status {
                status: 503,
                body: "busy".to_owned(),
            })
        }
    })
    .await;

    assert_eq!(attempts.get(), 3);
    assert_eq!(
        result.unwrap_err().to_string(),
        "HTTP 503: busy"
    );
}

#[tokio::test(start_paused = true)]
async fn invalid_images_are_not_retried() {
    let attempts = Cell::new(0);

    let result: Result<(), RenderError> = retry_with_backoff(RetryPolicy::default(), || {
        attempts.set(attempts.get() + 1);
        async { Err(RenderError::InvalidImage("bad".to_owned())) }
    })
    .await;

    assert_eq!(attempts.get(), 1);
    assert!(result.is_err());
}

#[tokio::test]
async fn render_image_measures_and_scales_the_output() {
    let renderer = StubRenderer::new(800, 400);

    let block = render_image(
        &renderer,
        "graph TD; A-->B",
        DiagramTheme::Tech,
        15.0,
        Some("Flow".to_owned()),
    )
    .await
    .expect("render");

    assert_eq!((block.pixel_width, block.pixel_height), (800, 400));
    assert_eq!((block.display_width, block.display_height), (567, 284));
    assert_eq!(block.caption.as_deref(), Some("Flow"));
    let sources = renderer.sources();
    assert_eq!(sources.len(), 1);
    assert!(sources[0].contains("#722ed1"));
}

#[tokio::test]
async fn render_image_surfaces_malformed_payloads() {
    let renderer = StubRenderer::new(10, 10).then(Ok(b"not a png".to_vec()));

    let err = render_image(&renderer, "graph TD; A-->B", DiagramTheme::Default, 15.0, None)
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::InvalidImage(_)));
}
