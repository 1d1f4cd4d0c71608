//! 대화형 입력 처리 테스트. 표준 입력 대신 메모리 버퍼를 쓴다.
use std::io::{Cursor, ErrorKind};

use feasibility_toolbox::app::AppError;
use feasibility_toolbox::i18n::Translator;
use feasibility_toolbox::ui_cli::{self, MenuChoice};

fn is_eof(err: &AppError) -> bool {
    matches!(err, AppError::Io(e) if e.kind() == ErrorKind::UnexpectedEof)
}

#[test]
fn menu_reports_end_of_input() {
    let tr = Translator::new("en");
    let err = ui_cli::main_menu_from(&tr, &mut Cursor::new("")).expect_err("eof");
    assert!(is_eof(&err), "{err:?}");
}

#[test]
fn menu_retries_then_stops_at_end_of_input() {
    let tr = Translator::new("en");
    let err = ui_cli::main_menu_from(&tr, &mut Cursor::new("9\nx\n")).expect_err("eof");
    assert!(is_eof(&err), "{err:?}");
}

#[test]
fn menu_accepts_selection() {
    let tr = Translator::new("en");
    let choice = ui_cli::main_menu_from(&tr, &mut Cursor::new("7\n2\n")).expect("choice");
    assert_eq!(choice, MenuChoice::Sweep);
}

#[test]
fn number_prompt_stops_at_end_of_input() {
    let tr = Translator::new("en");
    let err = ui_cli::read_f64_from(&tr, &mut Cursor::new("abc\n"), "> ").expect_err("eof");
    assert!(is_eof(&err), "{err:?}");
}

#[test]
fn number_prompt_skips_invalid_lines() {
    let tr = Translator::new("en");
    let v = ui_cli::read_f64_from(&tr, &mut Cursor::new("abc\n 42.5 \n"), "> ").expect("number");
    assert_eq!(v, 42.5);
}

#[test]
fn line_reader_keeps_blank_lines() {
    let line = ui_cli::read_line_from(&mut Cursor::new("\n"), "> ").expect("line");
    assert_eq!(line, "\n");
}
