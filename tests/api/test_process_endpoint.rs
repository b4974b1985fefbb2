// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Process endpoint tests for POST /process
//!
//! These tests verify that the process route:
//! - Analyzes uploaded images and returns the full result body
//! - Rejects forms without an `image` field (400)
//! - Rejects `image` fields without a filename (400)
//! - Reports undecodable payloads as processing failures (500)

use ai_image_processor::api::create_app;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma};
use serde_json::Value;
use std::io::Cursor;
use tower::util::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "x-test-boundary-7f12";

/// One multipart form part: (field name, optional filename, payload)
type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, f
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Encode a uniform grayscale PNG in memory
fn png_fixture(value: u8, width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Encode an alternating 0/255 checkerboard PNG in memory
fn checkerboard_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

#[tokio::test]
async fn test_dark_image_is_low_light() {
    let png = png_fixture(10, 64, 64);
    let request = multipart_request(&[("image", Some("dark.png"), &png)]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["classification"], "Low-light Image");
    assert_eq!(json["confidence"], 0.88);
    assert_eq!(json["image_info"]["width"], 64);
    assert_eq!(json["image_info"]["height"], 64);
    assert_eq!(json["image_info"]["brightness"], 10.0);
    assert_eq!(json["image_info"]["contrast"], 0.0);
    assert_eq!(json["processing_time"], 0.5);
    assert_eq!(json["filename"], "dark.png");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_bright_image_classification() {
    let png = png_fixture(220, 32, 32);
    let request = multipart_request(&[("image", Some("bright.png"), &png)]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["classification"], "Bright Image");
    assert_eq!(json["confidence"], 0.85);
    // Bright images also count as well-lit
    assert_eq!(json["objects"][1]["label"], "Well-lit Area");
    assert_eq!(json["objects"][1]["confidence"], 0.85);
}

#[tokio::test]
async fn test_high_contrast_image_classification() {
    let png = checkerboard_fixture(16, 16);
    let request = multipart_request(&[("image", Some("checker.png"), &png)]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["classification"], "High Contrast Image");
    assert_eq!(json["confidence"], 0.82);
    assert_eq!(json["image_info"]["brightness"], 127.5);
    assert_eq!(json["image_info"]["contrast"], 127.5);
}

#[tokio::test]
async fn test_orientation_objects() {
    // 100x50 is landscape
    let png = png_fixture(128, 100, 50);
    let request = multipart_request(&[("image", Some("wide.png"), &png)]);
    let json = body_json(create_app().oneshot(request).await.unwrap()).await;
    assert_eq!(json["objects"][0]["label"], "Landscape Orientation");
    assert_eq!(json["objects"][0]["confidence"], 0.9);

    // 50x100 is portrait
    let png = png_fixture(128, 50, 100);
    let request = multipart_request(&[("image", Some("tall.png"), &png)]);
    let json = body_json(create_app().oneshot(request).await.unwrap()).await;
    assert_eq!(json["objects"][0]["label"], "Portrait Orientation");

    // 50x50 ties go to portrait
    let png = png_fixture(128, 50, 50);
    let request = multipart_request(&[("image", Some("square.png"), &png)]);
    let json = body_json(create_app().oneshot(request).await.unwrap()).await;
    assert_eq!(json["objects"][0]["label"], "Portrait Orientation");
}

#[tokio::test]
async fn test_objects_always_has_two_entries() {
    for value in [10u8, 128, 220] {
        let png = png_fixture(value, 20, 20);
        let request = multipart_request(&[("image", Some("img.png"), &png)]);
        let json = body_json(create_app().oneshot(request).await.unwrap()).await;
        assert_eq!(json["objects"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_missing_image_field_is_rejected() {
    let request = multipart_request(&[("avatar", Some("a.png"), b"ignored")]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No image file provided");
}

#[tokio::test]
async fn test_empty_form_is_rejected() {
    let request = multipart_request(&[]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No image file provided");
}

#[tokio::test]
async fn test_empty_filename_is_rejected() {
    let png = png_fixture(128, 8, 8);
    let request = multipart_request(&[("image", Some(""), &png)]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No file selected");
}

#[tokio::test]
async fn test_corrupt_payload_is_processing_failure() {
    let request = multipart_request(&[("image", Some("fake.png"), b"this is not an image")]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(
        message.starts_with("Processing failed"),
        "unexpected error message: {}",
        message
    );
}

#[tokio::test]
async fn test_truncated_png_is_processing_failure() {
    // Valid PNG magic, corrupt body
    let payload = [0x89, 0x50, 0x4E, 0x47, 0x00, 0x00, 0x00, 0x00];
    let request = multipart_request(&[("image", Some("broken.png"), &payload)]);

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Processing failed"));
}

#[tokio::test]
async fn test_process_rejects_get() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/process")
        .body(Body::empty())
        .unwrap();

    let response = create_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
