use clap::Parser;
use hot_water_lifecycle::{app, config, i18n};

/// 온수 설비 수명주기 계산기(CLI).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let args = CliArgs::parse();
    if let Err(err) = try_run(&args) {
        tracing::error!(error = %err, "cli terminated");
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(args: &CliArgs) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default()?;
    app::init_tracing(cfg.tracing_level());
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let mut tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    tracing::info!(lang = tr.language_code(), "cli started");
    app::run(&mut cfg, &mut tr)?;
    Ok(())
}
