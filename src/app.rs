use std::io;

use crate::config::{Config, ConfigError};
use crate::feasibility::{InputError, UnknownTier};
use crate::i18n::{self, Translator};
use crate::report::ReportError;
use crate::sensitivity::SweepError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("입력 오류: {0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Tier(#[from] UnknownTier),
    #[error("민감도 분석 오류: {0}")]
    Sweep(#[from] SweepError),
    #[error("보고서 오류: {0}")]
    Report(#[from] ReportError),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        // 표준 입력이 닫히면 종료 메뉴와 같이 저장 후 끝낸다.
        let choice = match ui_cli::main_menu(tr) {
            Ok(choice) => choice,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => MenuChoice::Exit,
            Err(e) => return Err(e),
        };
        let outcome = match choice {
            MenuChoice::Evaluate => ui_cli::handle_evaluate(tr, config),
            MenuChoice::Sweep => ui_cli::handle_sweep(tr, config),
            MenuChoice::Presets => ui_cli::handle_presets(tr, config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                Ok(())
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 입력 검증/스윕 구간 오류는 메뉴로 돌아가고, 입출력 오류만 루프를 끝낸다.
        match outcome {
            Ok(()) => {}
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX)),
        }
    }
    Ok(())
}
