//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 렌더러(대시보드, 리포트)도 같은 계산을 쓰게 한다.

pub mod app;
pub mod config;
pub mod feasibility;
pub mod i18n;
pub mod report;
pub mod sensitivity;
pub mod ui_cli;
