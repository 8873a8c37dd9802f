//! 사이드바 로고 이미지 로딩.

use std::fs;
use std::path::Path;

use image::GenericImageView;
use thiserror::Error;

/// 로고 탐색 기본 경로.
pub const LOGO_SEARCH_PATHS: [&str; 4] = [
    "logo.png",
    "assets/logo.png",
    "../logo.png",
    "../../logo.png",
];

/// 이미지 자원 로딩 오류.
#[derive(Debug, Error)]
pub enum AssetError {
    /// 후보 경로 어디에도 파일이 없음
    #[error("자원을 찾을 수 없음: {0}")]
    ResourceNotFound(String),
    #[error("이미지 디코딩 오류: {0}")]
    Decode(#[from] image::ImageError),
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
}

/// 디코딩된 RGBA 이미지.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// 행 우선 RGBA8 픽셀
    pub rgba: Vec<u8>,
}

/// 후보 경로를 순서대로 찾아 처음 존재하는 이미지를 읽는다.
pub fn load_logo(candidates: &[&str]) -> Result<LogoImage, AssetError> {
    let path = candidates
        .iter()
        .copied()
        .find(|p| Path::new(p).exists())
        .ok_or_else(|| AssetError::ResourceNotFound(candidates.join(", ")))?;
    let bytes = fs::read(path)?;
    let img = image::load_from_memory(&bytes)?;
    let (width, height) = img.dimensions();
    tracing::debug!(path, width, height, "logo loaded");
    Ok(LogoImage {
        width,
        height,
        rgba: img.to_rgba8().into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_logo_reports_resource_not_found() {
        let err = load_logo(&["/definitely/not/here/logo.png"]).unwrap_err();
        match err {
            AssetError::ResourceNotFound(list) => assert!(list.contains("logo.png")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
