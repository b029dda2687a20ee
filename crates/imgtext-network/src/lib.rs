//! # imgtext-network
//!
//! 원격 OCR API 어댑터.
//! `OcrProvider` 포트를 구현하며 이미지를 multipart form으로 업로드한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use imgtext_network::ninjas_ocr_client::NinjasOcrClient;
//!
//! let client = NinjasOcrClient::new(&config.ocr_api)?;
//! let response = client.recognize(&file).await?;
//! ```

pub mod ninjas_ocr_client;
