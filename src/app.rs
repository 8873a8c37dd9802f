use thiserror::Error;

use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("계산 오류: {0}")]
    Lifecycle(#[from] crate::lifecycle::LifecycleError),
    #[error("내보내기 오류: {0}")]
    Export(#[from] crate::export::ExportError),
}

/// stderr로 출력하는 tracing 구독자를 설치한다. 이미 설치돼 있으면 무시한다.
pub fn init_tracing(level: tracing::Level) {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산/내보내기 오류는 메시지만 보여주고 메뉴로 돌아간다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::Lifecycle => ui_cli::handle_lifecycle(tr, config),
            MenuChoice::HotWaterEnergy => ui_cli::handle_hot_water(tr, config),
            MenuChoice::Loan => ui_cli::handle_loan(tr, config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                let lang = i18n::resolve_language(&config.language, None);
                *tr = Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                Ok(())
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Err(err @ (AppError::Lifecycle(_) | AppError::Export(_))) => {
                tracing::warn!(error = %err, "calculation failed");
                println!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            other => other?,
        }
    }
    Ok(())
}
