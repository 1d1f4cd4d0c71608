//! 매입-리모델링-재매각 사업의 타당성 계산 모듈 모음.

pub mod calculator;
pub mod constants;
pub mod financing;
pub mod tier;
pub mod waterfall;

pub use calculator::*;
pub use tier::*;
