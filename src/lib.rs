//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 엔진을 쓰도록 한다.

pub mod app;
pub mod assets;
pub mod config;
pub mod export;
pub mod i18n;
pub mod lifecycle;
pub mod report;
pub mod ui_cli;
