//! 썸네일 생성.
//!
//! fast_image_resize 기반 리사이즈 후 PNG로 인코딩하여 data URL을 만든다.
//! 브라우저의 object URL 대신 프레젠테이션 레이어가 그대로 표시할 수 있는 형태.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use fast_image_resize::{images::Image as FirImage, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, ImageFormat, RgbaImage};
use imgtext_core::error::CoreError;
use imgtext_core::models::ui::Thumbnail;
use imgtext_core::models::upload::SelectedFile;
use std::io::Cursor;
use tracing::debug;

/// 선택된 파일로 고정 크기 썸네일 생성
pub fn render_thumbnail(
    file: &SelectedFile,
    width: u32,
    height: u32,
) -> Result<Thumbnail, CoreError> {
    let image = image::load_from_memory(&file.bytes)
        .map_err(|e| CoreError::Image(format!("이미지 디코딩 실패 ({}): {e}", file.name)))?;

    let resized = fast_resize(&image, width, height)?;
    let png = encode_png(&resized)?;

    debug!(
        file = %file.name,
        src = ?(image.width(), image.height()),
        png_bytes = png.len(),
        "썸네일 생성"
    );

    Ok(Thumbnail {
        data_url: format!("data:image/png;base64,{}", B64.encode(&png)),
        width,
        height,
    })
}

/// 고속 리사이즈 (종횡비 무시, 정확히 목표 크기)
pub fn fast_resize(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<DynamicImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());

    if src_w == width && src_h == height {
        return Ok(image.clone());
    }
    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Image("소스 이미지 크기 0".to_string()));
    }
    if width == 0 || height == 0 {
        return Err(CoreError::Image("목표 이미지 크기 0".to_string()));
    }

    let src_image = FirImage::from_vec_u8(
        src_w,
        src_h,
        image.to_rgba8().into_raw(),
        fast_image_resize::PixelType::U8x4,
    )
    .map_err(|e| CoreError::Image(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(width, height, fast_image_resize::PixelType::U8x4);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Image(format!("리사이즈 실패: {e}")))?;

    let result = RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Image("결과 이미지 생성 실패".to_string()))?;

    Ok(DynamicImage::ImageRgba8(result))
}

/// PNG 인코딩
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| CoreError::Image(format!("PNG 인코딩 실패: {e}")))?;
    Ok(buf)
}
